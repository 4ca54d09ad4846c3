use crate::config::{Settings, settings_path};
use crate::error::Result;
use colored::Colorize;

pub fn show(settings: &Settings) {
    for (key, value) in settings.entries() {
        println!("{:<40} {}", key.bold(), value.cyan());
    }
    println!(
        "{}",
        format!("({})", settings_path().display()).dimmed()
    );
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load();
    settings.set(key, value)?;
    settings.save()?;
    println!("  {} {} = {}", "✓".green(), key.bold(), value.cyan());
    Ok(())
}
