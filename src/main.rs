use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;

use spigot::config::Settings;
use spigot::error::SpigotError;
use spigot::progress::ProgressTracker;
use spigot::state::{BrewData, TapList};
use spigot::{Result, ops};

#[derive(Parser)]
#[command(name = "spigot")]
#[command(author, version, about = "A terminal front-end for Homebrew", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed formulae and casks
    List {
        /// Show formulae only
        #[arg(long)]
        formula: bool,

        /// Show casks only
        #[arg(long)]
        cask: bool,

        /// Show versions, sizes, and install dates
        #[arg(long)]
        long: bool,
    },

    /// Show information about formulae or casks
    Info {
        /// Formula/cask names
        #[arg(required = true)]
        names: Vec<String>,

        /// Print brew's raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Search for formulae and casks
    Search {
        /// Query string
        query: String,
    },

    /// Install formulae or casks
    Install {
        /// Formula/cask names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Uninstall formulae or casks
    Uninstall {
        /// Formula/cask names
        #[arg(required = true)]
        names: Vec<String>,

        /// Ignore dependents (force uninstall)
        #[arg(long)]
        force: bool,
    },

    /// Refresh taps and package metadata
    Update,

    /// Update, then upgrade installed packages
    Upgrade {
        /// Package names (or all outdated if empty)
        names: Vec<String>,
    },

    /// Add a tap (third-party repository), or list taps
    Tap {
        /// Tap name (user/repo format, or empty to list all taps)
        tap: Option<String>,
    },

    /// Remove a tap
    Untap {
        /// Tap name (user/repo format)
        tap: String,
    },

    /// Show details for a tap
    TapInfo {
        /// Tap name (user/repo format)
        tap: String,

        /// Print brew's raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show or change preferences
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print all preferences
    Show,
    /// Change one preference
    Set { key: String, value: String },
}

fn init_colors() {
    use colored::control;

    // NO_COLOR wins (https://no-color.org/), CLICOLOR_FORCE overrides TTY
    // detection, otherwise color only when stdout is a terminal.
    if std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if std::env::var("CLICOLOR_FORCE").map(|v| v != "0").unwrap_or(false) {
        control::set_override(true);
    } else if !std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        control::set_override(false);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", if cli.verbose { "debug" } else { "warn" });
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    init_colors();

    if let Err(err) = run(cli).await {
        render_error(&err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();
    let data = BrewData::new();
    let taps = TapList::new();

    match cli.command {
        Some(Commands::List {
            formula,
            cask,
            long,
        }) => {
            ops::list(&data, &settings, formula, cask, long).await?;
        }
        Some(Commands::Info { names, json }) => {
            ops::info(&settings, &names, json).await?;
        }
        Some(Commands::Search { query }) => {
            ops::search(&settings, &query).await?;
        }
        Some(Commands::Install { names }) => {
            ops::install(&names).await?;
        }
        Some(Commands::Uninstall { names, force }) => {
            ops::uninstall(&names, force).await?;
        }
        Some(Commands::Update) => {
            let mut tracker = ProgressTracker::new();
            ops::update(&mut tracker).await?;
        }
        Some(Commands::Upgrade { names }) => {
            let mut tracker = ProgressTracker::new();
            ops::upgrade(&mut tracker, &names).await?;
        }
        Some(Commands::Tap { tap }) => {
            ops::tap(&taps, tap.as_deref()).await?;
        }
        Some(Commands::Untap { tap }) => {
            ops::untap(&taps, &tap).await?;
        }
        Some(Commands::TapInfo { tap, json }) => {
            ops::tap_info(&tap, json).await?;
        }
        Some(Commands::Config { action }) => match action {
            None | Some(ConfigAction::Show) => ops::config::show(&settings),
            Some(ConfigAction::Set { key, value }) => ops::config::set(&key, &value)?,
        },
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
        None => {
            println!(
                "{} spigot - a terminal front-end for Homebrew",
                "🍺".bold()
            );
            println!(
                "\nRun {} to see available commands.",
                "spigot --help".cyan()
            );
        }
    }

    Ok(())
}

fn render_error(err: &SpigotError) {
    match err {
        SpigotError::DependencyConflict {
            package,
            dependents,
        } => {
            eprintln!("{} Could not uninstall {}", "✗".red().bold(), package.bold());
            eprintln!(
                "  This package is a dependency of {}",
                dependents.join(", ").cyan()
            );
            eprintln!("  Use {} to uninstall anyway", "--force".dimmed());
        }
        SpigotError::LaunchFailed { program, .. } => {
            eprintln!(
                "{} Could not run {} - is Homebrew installed?",
                "✗".red().bold(),
                program.display().to_string().bold()
            );
        }
        other => {
            eprintln!("{} {other}", "✗".red().bold());
            if let Some(stderr) = other.stderr() {
                for line in stderr.lines() {
                    eprintln!("  {}", line.dimmed());
                }
            }
        }
    }
}
