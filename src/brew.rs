//! Locating the Homebrew installation - executable and well-known directories

use std::path::PathBuf;

/// Detect the Homebrew prefix on this system
pub fn detect_prefix() -> PathBuf {
    // First check environment variable
    if let Ok(prefix) = std::env::var("HOMEBREW_PREFIX") {
        return PathBuf::from(prefix);
    }

    // Detect by architecture
    #[cfg(target_arch = "aarch64")]
    {
        PathBuf::from("/opt/homebrew")
    }
    #[cfg(target_arch = "x86_64")]
    {
        PathBuf::from("/usr/local")
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
    {
        PathBuf::from("/usr/local")
    }
}

/// Path to the brew executable itself.
///
/// `HOMEBREW_BREW_FILE` (set by brew for its own subprocesses) wins, then the
/// detected prefix. Falls back to `brew` and lets PATH resolution decide, so
/// a missing installation surfaces as a launch failure instead of a wrong
/// hardcoded path.
pub fn brew_executable() -> PathBuf {
    if let Ok(file) = std::env::var("HOMEBREW_BREW_FILE") {
        return PathBuf::from(file);
    }

    let candidate = detect_prefix().join("bin/brew");
    if candidate.exists() {
        return candidate;
    }

    PathBuf::from("brew")
}

/// Get the Cellar directory path
pub fn cellar_path() -> PathBuf {
    detect_prefix().join("Cellar")
}

/// Get the Caskroom directory path
pub fn caskroom_path() -> PathBuf {
    detect_prefix().join("Caskroom")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cellar_is_under_prefix() {
        assert!(cellar_path().starts_with(detect_prefix()));
        assert!(cellar_path().ends_with("Cellar"));
    }

    #[test]
    fn caskroom_is_under_prefix() {
        assert!(caskroom_path().ends_with("Caskroom"));
    }
}
