use crate::error::{Result, SpigotError};
use crate::packages::PackageKind;
use crate::process;
use colored::Colorize;

pub async fn uninstall(names: &[String], force: bool) -> Result<()> {
    let mut actually_uninstalled = 0;

    for name in names {
        let mut args = vec!["uninstall"];
        if force {
            args.push("--ignore-dependencies");
        }
        args.push(name.as_str());

        match process::brew(args)?.collect_output().await {
            Ok(output) => {
                for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
                    println!("  {}", line.dimmed());
                }
                println!("  {} Uninstalled {}", "✓".green(), name.bold().green());
                actually_uninstalled += 1;
            }
            Err(err @ SpigotError::NonZeroExit { .. }) => {
                let stderr = err.stderr().unwrap_or_default();
                if let Some(dependents) = parse_dependency_conflict(stderr) {
                    // Nothing was removed; surface the conflict as its own
                    // error kind so the caller can raise a dedicated alert.
                    return Err(SpigotError::DependencyConflict {
                        package: name.clone(),
                        dependents,
                    });
                }
                if stderr.contains("No such keg") || stderr.contains("is not installed") {
                    println!("  {} {} not installed", "⚠".yellow(), name.bold());
                    if let Some(suggestion) = suggest_installed(name).await {
                        println!("    Did you mean {}?", suggestion.cyan());
                    }
                    continue;
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        }
    }

    if actually_uninstalled > 0 {
        println!(
            "{} Uninstalled {} package{}",
            "✓".green().bold(),
            actually_uninstalled.to_string().bold(),
            if actually_uninstalled == 1 { "" } else { "s" }
        );
    } else {
        println!("No packages were uninstalled");
    }
    Ok(())
}

/// Near-miss suggestion from the installed package names.
async fn suggest_installed(name: &str) -> Option<String> {
    let mut candidates = super::list::load_installed(PackageKind::Formula)
        .await
        .ok()?;
    if let Ok(casks) = super::list::load_installed(PackageKind::Cask).await {
        candidates.extend(casks);
    }
    super::closest_match(name, candidates.iter().map(|p| p.name.as_str()))
}

/// Extract dependent package names from brew's uninstall refusal:
///
/// ```text
/// Error: Refusing to uninstall /opt/homebrew/Cellar/xz/5.4.4
/// because it is required by aom, ffmpeg and libtiff, which are currently installed.
/// ```
fn parse_dependency_conflict(stderr: &str) -> Option<Vec<String>> {
    const MARKER: &str = "because it is required by ";
    let start = stderr.find(MARKER)? + MARKER.len();
    let rest = &stderr[start..];
    let end = rest.find(", which").unwrap_or(rest.len());

    let dependents: Vec<String> = rest[..end]
        .split(", ")
        .flat_map(|chunk| chunk.split(" and "))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if dependents.is_empty() {
        None
    } else {
        Some(dependents)
    }
}
