use crate::config::Settings;
use crate::error::Result;
use crate::packages::{self, Package, PackageKind};
use crate::process;
use crate::state::BrewData;
use colored::Colorize;

/// Load installed packages of one kind via `brew list --versions`, then
/// enrich each with install date and size from its keg directory.
pub async fn load_installed(kind: PackageKind) -> Result<Vec<Package>> {
    let flag = match kind {
        PackageKind::Formula => "--formula",
        PackageKind::Cask => "--cask",
    };
    let output = process::brew(["list", flag, "--versions"])?
        .collect_output()
        .await?;

    let mut installed: Vec<Package> = output
        .stdout
        .lines()
        .filter_map(|line| packages::parse_versions_line(line, kind))
        .collect();
    for package in &mut installed {
        package.enrich_from_disk();
    }
    tracing::debug!(kind = kind.label(), count = installed.len(), "loaded installed packages");
    Ok(installed)
}

/// Replace both store lists wholesale. One brew invocation at a time.
pub async fn refresh(data: &BrewData) -> Result<()> {
    data.formulae
        .replace(load_installed(PackageKind::Formula).await?);
    data.casks.replace(load_installed(PackageKind::Cask).await?);
    Ok(())
}

pub async fn list(
    data: &BrewData,
    settings: &Settings,
    formulae_only: bool,
    casks_only: bool,
    long: bool,
) -> Result<()> {
    refresh(data).await?;

    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());

    if !casks_only {
        let mut formulae = data.formulae.get();
        packages::sort_packages(&mut formulae, settings.sort_packages_by);
        if !formulae_only && is_tty {
            println!("{}", "Installed Formulae".bold());
        }
        render(&formulae, long, is_tty);
    }

    if !formulae_only {
        let mut casks = data.casks.get();
        packages::sort_packages(&mut casks, settings.sort_packages_by);
        if !casks_only && is_tty {
            println!("{}", "Installed Casks".bold());
        }
        render(&casks, long, is_tty);
    }

    if is_tty && !formulae_only && !casks_only {
        println!(
            "{}",
            format!("{} packages installed", data.installed_count()).dimmed()
        );
    }

    Ok(())
}

fn render(installed: &[Package], long: bool, is_tty: bool) {
    if installed.is_empty() {
        if is_tty {
            println!("{}", "  (none)".dimmed());
        }
        return;
    }

    if long {
        for package in installed {
            let date = package
                .installed_on
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let size = package
                .size_bytes
                .map(packages::format_size)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<32} {:<16} {:<12} {}",
                package.name.cyan(),
                package.version,
                size,
                date.dimmed()
            );
        }
    } else if is_tty {
        let names: Vec<String> = installed.iter().map(|p| p.name.clone()).collect();
        print!("{}", super::format_columns(&names));
    } else {
        // Piped: one name per line, nothing decorative.
        for package in installed {
            println!("{}", package.name);
        }
    }
}
