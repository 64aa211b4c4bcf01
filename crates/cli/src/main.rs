//! reqprio - Requirement Prioritization
//!
//! Scores a directory of markdown requirements so that every requirement
//! outranks the requirements that depend on it, then reports, validates or
//! persists the resulting priorities.

mod commands;
mod config;
mod frontmatter;
mod loader;
mod output;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prioritizer::PriorityTier;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::ScoreFormat;

/// reqprio - Dependency-aware requirement prioritization
#[derive(Parser)]
#[command(name = "reqprio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score requirement priorities from their dependency graph")]
#[command(long_about = r#"
reqprio reads markdown requirements with YAML frontmatter and assigns each one
a score and a tier (Critical, High, Medium, Low, Deferred). A requirement always
scores at least 0.5 above anything that depends on it; unmet dependencies pull
the score down, never below 4.0.

Examples:
  reqprio                          # Score requirements in the current directory
  reqprio --dir docs/requirements  # Score a specific directory
  reqprio score --tier critical    # Only show Critical requirements
  reqprio summary                  # Write PRIORITIES.md
  reqprio validate                 # Fail if persisted priorities are stale
  reqprio update --dry-run         # Show which files would change
"#)]
struct Cli {
    /// Requirements directory (defaults to config, then current directory)
    #[arg(short = 'd', long, env = "REQPRIO_DIR")]
    dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, env = "REQPRIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every requirement and print the ranking
    Score {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ScoreFormat,

        /// Only show one tier
        #[arg(short, long)]
        tier: Option<PriorityTier>,
    },

    /// Write the markdown priority summary
    Summary {
        /// Output file (defaults to paths.summaryFile in the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Check persisted priorities against a fresh run
    Validate,

    /// Write fresh priorities back into requirement frontmatter
    Update {
        /// Show changes without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("reqprio={0},prioritizer={0},warn", log_level).into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration; the project config lives in the requirements directory
    let cwd = std::env::current_dir()?;
    let initial_dir = cli.dir.clone().unwrap_or_else(|| cwd.clone());
    let (config, config_source) = config::Config::load(cli.config.as_deref(), &initial_dir)?;

    let dir = cli
        .dir
        .clone()
        .or_else(|| config.paths.requirements_dir.clone())
        .unwrap_or(cwd);

    match cli.command {
        Some(Commands::Score { format, tier }) => {
            commands::score(&dir, &config, format, tier)?;
        }
        Some(Commands::Summary { output, stdout }) => {
            commands::summary(&dir, &config, output.as_deref(), stdout)?;
        }
        Some(Commands::Validate) => {
            if !commands::validate(&dir, &config)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Update { dry_run }) => {
            commands::update(&dir, &config, dry_run)?;
        }
        Some(Commands::Config { show }) => {
            commands::show_config(&config, config_source.as_deref(), show)?;
        }
        None => {
            commands::score(&dir, &config, ScoreFormat::Table, None)?;
        }
    }

    Ok(())
}
