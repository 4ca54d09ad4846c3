use crate::config::Settings;
use crate::error::Result;
use crate::process;
use colored::Colorize;

pub async fn search(settings: &Settings, query: &str) -> Result<()> {
    let mut args = vec!["search"];
    if settings.show_descriptions_in_search_results {
        args.push("--desc");
    }
    args.push(query);

    let output = process::brew(args)?.collect_output().await?;

    let mut hits = 0;
    for line in output.stdout.lines() {
        if line.starts_with("==>") {
            println!("{}", line.bold());
        } else {
            if !line.trim().is_empty() {
                hits += 1;
            }
            println!("{line}");
        }
    }

    if hits == 0 {
        println!("{} No results for '{}'", "✗".red(), query.bold());
    }
    Ok(())
}
