use crate::error::Result;
use crate::process::{self, OutputEvent};
use crate::state::TapList;
use colored::Colorize;
use futures::StreamExt;

/// Refresh the tap store from `brew tap` and return the names.
pub async fn load_taps(taps: &TapList) -> Result<Vec<String>> {
    let output = process::brew(["tap"])?.collect_output().await?;
    let names: Vec<String> = output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    taps.replace(names.clone());
    Ok(names)
}

/// With no name, list tapped taps; with a name, add the tap.
pub async fn tap(taps: &TapList, name: Option<&str>) -> Result<()> {
    match name {
        None => {
            let names = load_taps(taps).await?;
            if names.is_empty() {
                println!("No taps installed");
            } else {
                for name in names {
                    println!("{}", name.cyan());
                }
            }
        }
        Some(name) => {
            if load_taps(taps).await?.iter().any(|tapped| tapped == name) {
                println!("  {} {} already tapped", "✓".green(), name.bold());
                return Ok(());
            }

            println!("Tapping {}...", name.cyan());
            let mut stream = process::brew(["tap", name])?;
            while let Some(event) = stream.next().await {
                match event {
                    OutputEvent::Stdout(line) => println!("  {}", line.dimmed()),
                    OutputEvent::Stderr(line) => println!("  {} {}", "⚠".yellow(), line),
                }
            }
            stream.finish().await?;

            load_taps(taps).await?;
            println!("  {} Tapped {} successfully", "✓".green(), name.bold().green());
        }
    }
    Ok(())
}

pub async fn untap(taps: &TapList, name: &str) -> Result<()> {
    if !load_taps(taps).await?.iter().any(|tapped| tapped == name) {
        println!("  {} {} is not tapped", "⚠".yellow(), name.bold());
        return Ok(());
    }

    println!("Untapping {}...", name.cyan());
    process::brew(["untap", name])?.collect_output().await?;
    load_taps(taps).await?;

    println!(
        "  {} Untapped {} successfully",
        "✓".green(),
        name.bold().green()
    );
    Ok(())
}

pub async fn tap_info(name: &str, json: bool) -> Result<()> {
    let output = process::brew(["tap-info", "--json", name])?
        .collect_output()
        .await?;

    if json {
        print!("{}", output.stdout);
        return Ok(());
    }

    let parsed = parse_first_tap(&output.stdout)?;
    let Some(tap) = parsed else {
        println!("  {} Tap {} is not installed", "⚠".yellow(), name.bold());
        return Ok(());
    };

    let shield = if tap.official {
        " ✓ official".green().to_string()
    } else {
        String::new()
    };
    println!("{}{}", tap.name.bold(), shield);
    println!();
    println!("{}: {}", "Contents".bold(), tap.contents_description());
    println!(
        "{}: {}",
        "Number of packages".bold(),
        tap.number_of_packages()
    );
    if let Some(homepage) = &tap.homepage {
        println!("{}: {}", "Homepage".bold(), homepage.cyan());
    }

    if let Some(formulae) = &tap.included_formulae {
        println!();
        println!("{}", "Formulae included".bold());
        print!("{}", super::format_columns(formulae));
    }
    if let Some(casks) = &tap.included_casks {
        println!();
        println!("{}", "Casks included".bold());
        print!("{}", super::format_columns(casks));
    }

    Ok(())
}

fn parse_first_tap(stdout: &str) -> Result<Option<crate::parse::TapInfo>> {
    Ok(crate::parse::parse_tap_info(stdout)?.into_iter().next())
}
