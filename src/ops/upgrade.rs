use crate::error::Result;
use crate::process::{self, OutputStream};
use crate::progress::{ProgressTracker, UpdateStage};
use colored::Colorize;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};

/// Refresh the taps and formula metadata (`brew update`).
pub async fn update(tracker: &mut ProgressTracker) -> Result<()> {
    let bar = progress_bar();
    tracker.start(UpdateStage::Updating);
    bar.set_message("Updating Homebrew...");

    drive_stage(process::brew(["update"])?, tracker, &bar).await;

    tracker.finish();
    bar.finish_and_clear();
    report(tracker);
    Ok(())
}

/// Update, then upgrade: Idle → Updating → Upgrading → Idle.
///
/// Error lines never abort the run; they accumulate on the tracker and are
/// surfaced after completion.
pub async fn upgrade(tracker: &mut ProgressTracker, names: &[String]) -> Result<()> {
    let bar = progress_bar();
    tracker.start(UpdateStage::Updating);
    bar.set_message("Updating Homebrew...");

    drive_stage(process::brew(["update"])?, tracker, &bar).await;

    tracker.advance_stage(UpdateStage::Upgrading);
    bar.set_message(if names.is_empty() {
        "Upgrading all packages...".to_string()
    } else {
        format!("Upgrading {}...", names.join(", "))
    });

    let mut args = vec!["upgrade".to_string()];
    args.extend(names.iter().cloned());
    drive_stage(process::brew(&args)?, tracker, &bar).await;

    tracker.finish();
    bar.finish_and_clear();
    report(tracker);
    Ok(())
}

/// Consume one stage's output: stdout advances progress, stderr accumulates.
/// A non-zero exit becomes one more accumulated error, not an abort.
async fn drive_stage(mut stream: OutputStream, tracker: &mut ProgressTracker, bar: &ProgressBar) {
    while let Some(event) = stream.next().await {
        tracker.record(&event);
        bar.set_position(u64::from(tracker.percent()));
        if let crate::process::OutputEvent::Stdout(line) = &event {
            tracing::debug!(stage = tracker.stage().label(), line = %line);
        }
    }

    if let Err(err) = stream.finish().await {
        tracker.record_failure(err.to_string());
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {percent}% {msg}")
            .unwrap(),
    );
    bar
}

fn report(tracker: &ProgressTracker) {
    if tracker.has_errors() {
        println!(
            "{} Finished with {} error{}:",
            "⚠".yellow().bold(),
            tracker.errors().len().to_string().bold(),
            if tracker.errors().len() == 1 { "" } else { "s" }
        );
        for error in tracker.errors() {
            println!("  {} {}", "⚠".yellow(), error);
        }
    } else {
        println!("{} Everything up to date", "✓".green().bold());
    }
}
