use crate::config::{CaveatDisplay, Settings};
use crate::error::Result;
use crate::parse::{self, CaskDetails, FormulaDetails};
use crate::process;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

pub async fn info(settings: &Settings, names: &[String], json: bool) -> Result<()> {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());

    let spinner = if !json && is_tty {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Fetching info for {}...", names.join(", ")));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut args = vec!["info".to_string(), "--json=v2".to_string()];
    args.extend(names.iter().cloned());

    let output = match process::brew(&args) {
        Ok(stream) => stream.collect_output().await,
        Err(err) => Err(err),
    };
    spinner.finish_and_clear();
    let output = output?;

    if json {
        print!("{}", output.stdout);
        return Ok(());
    }

    let response = parse::parse_info(&output.stdout)?;
    if response.is_empty() {
        println!("{} No formula or cask found for '{}'", "✗".red(), names.join(", "));
        return Ok(());
    }

    for formula in &response.formulae {
        render_formula(formula, settings);
    }
    for cask in &response.casks {
        render_cask(cask);
    }

    Ok(())
}

fn render_formula(formula: &FormulaDetails, settings: &Settings) {
    println!("{}", format!("==> {}", formula.name).bold().green());
    if let Some(desc) = &formula.desc {
        println!("{}", desc);
    }
    if let Some(homepage) = &formula.homepage {
        println!("{}: {}", "Homepage".bold(), homepage);
    }
    if let Some(version) = &formula.versions.stable {
        println!("{}: {}", "Version".bold(), version);
    }

    if formula.installed.is_empty() {
        println!("{}: no", "Installed".bold());
    } else {
        for entry in &formula.installed {
            let origin = if entry.installed_as_dependency {
                " (as dependency)".dimmed().to_string()
            } else {
                String::new()
            };
            println!("{}: {}{}", "Installed".bold(), entry.version, origin);
        }
    }

    if !formula.dependencies.is_empty() {
        println!(
            "{}: {}",
            "Dependencies".bold(),
            formula.dependencies.join(", ")
        );
    }
    if settings.display_advanced_dependencies && !formula.build_dependencies.is_empty() {
        println!(
            "{}: {}",
            "Build dependencies".bold(),
            formula.build_dependencies.join(", ")
        );
    }

    if let Some(caveats) = formula.caveats_text() {
        match settings.caveat_display {
            CaveatDisplay::Full => {
                println!("{}:", "Caveats".bold().yellow());
                for line in caveats.lines() {
                    println!("  {line}");
                }
            }
            CaveatDisplay::Mini => {
                println!(
                    "{} {}",
                    "Has caveats".bold().yellow(),
                    "(set caveat-display to full to show them)".dimmed()
                );
            }
        }
    }
    println!();
}

fn render_cask(cask: &CaskDetails) {
    println!("{}", format!("==> {}", cask.token).bold().cyan());
    if !cask.name.is_empty() {
        println!("{}: {}", "Name".bold(), cask.name.join(", "));
    }
    if let Some(desc) = &cask.desc {
        println!("{}", desc);
    }
    if let Some(homepage) = &cask.homepage {
        println!("{}: {}", "Homepage".bold(), homepage);
    }
    if let Some(version) = &cask.version {
        println!("{}: {}", "Version".bold(), version);
    }
    println!();
}
