use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpigotError {
    #[error("failed to launch {}: {source}", program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {}", program.display(), code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    NonZeroExit {
        program: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot uninstall {package}: required by {}", dependents.join(", "))]
    DependencyConflict {
        package: String,
        dependents: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl SpigotError {
    /// Captured stderr of a failed invocation, if any survived.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            SpigotError::NonZeroExit { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpigotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_display_includes_status() {
        let err = SpigotError::NonZeroExit {
            program: PathBuf::from("/opt/homebrew/bin/brew"),
            code: Some(1),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("status 1"));
    }

    #[test]
    fn dependency_conflict_names_all_dependents() {
        let err = SpigotError::DependencyConflict {
            package: "openssl@3".to_string(),
            dependents: vec!["curl".to_string(), "wget".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("openssl@3"));
        assert!(msg.contains("curl, wget"));
    }
}
