use crate::error::Result;
use crate::process::{self, OutputEvent};
use colored::Colorize;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};

pub async fn install(names: &[String]) -> Result<()> {
    for name in names {
        install_one(name).await?;
    }
    Ok(())
}

async fn install_one(name: &str) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Installing {name}..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut stream = process::brew(["install", name])?;
    let mut error_lines = 0usize;

    while let Some(event) = stream.next().await {
        match event {
            OutputEvent::Stdout(line) => {
                spinner.set_message(format!("{name}: {}", line.trim()));
            }
            OutputEvent::Stderr(line) => {
                // brew narrates on stderr too; only surface lines that look
                // like real complaints, keep the rest as progress.
                if line.starts_with("Error") || line.starts_with("Warning") {
                    error_lines += 1;
                    spinner.println(format!("  {} {}", "⚠".yellow(), line));
                } else {
                    spinner.set_message(format!("{name}: {}", line.trim()));
                }
            }
        }
    }

    match stream.finish().await {
        Ok(()) => {
            spinner.finish_and_clear();
            if error_lines > 0 {
                println!(
                    "  {} Installed {} ({} warnings)",
                    "✓".green(),
                    name.bold().green(),
                    error_lines
                );
            } else {
                println!("  {} Installed {}", "✓".green(), name.bold().green());
            }
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            println!("  {} Failed to install {}", "✗".red(), name.bold());
            if let Some(stderr) = err.stderr() {
                for line in stderr.lines().rev().take(3).collect::<Vec<_>>().iter().rev() {
                    println!("    {}", line.dimmed());
                }
            }
            Err(err)
        }
    }
}
