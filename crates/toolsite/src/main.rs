//! toolsite CLI - build a deployable site from standalone HTML tools.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "toolsite")]
#[command(about = "Build a deployable site from a directory of standalone HTML tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to toolsite.toml config file
    #[arg(short, long, global = true, default_value = commands::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (the default when no command is given)
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use the built-in index page instead of a template file
        #[arg(long)]
        inline: bool,
    },

    /// Create a starter config, index template and stylesheet
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command.unwrap_or(Commands::Build {
        output: None,
        inline: false,
    }) {
        Commands::Build { output, inline } => {
            commands::build::run(&cli.config, output, inline)?;
        }
        Commands::Init { yes } => {
            commands::init::run(yes)?;
        }
    }

    Ok(())
}
