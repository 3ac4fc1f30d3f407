//! pagefoot CLI - inject a site footer into static HTML pages.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pagefoot")]
#[command(about = "Inject a site footer into static HTML pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to pagefoot.toml config file
    #[arg(short, long, default_value = "pagefoot.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Which pages to process.
#[derive(Args, Debug, Default)]
pub struct Targets {
    /// Pages to process, relative to the site directory (defaults to config)
    pages: Vec<String>,

    /// Site directory (defaults to config or "public")
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Process every .html file in the site directory
    #[arg(short, long, conflicts_with = "pages")]
    all: bool,

    /// With --all, descend into subdirectories
    #[arg(short, long, requires = "all")]
    recursive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pagefoot.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Inject the footer into pages
    Inject {
        #[command(flatten)]
        targets: Targets,

        /// Write through a temporary file and rename over the page
        #[arg(long)]
        atomic: bool,

        /// Inject whatever fits when a page lacks </head> or </body>
        #[arg(long)]
        allow_partial: bool,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which pages already carry the footer
    Status {
        #[command(flatten)]
        targets: Targets,
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

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Inject {
            targets,
            atomic,
            allow_partial,
            dry_run,
        } => {
            let flags = commands::inject::Flags {
                atomic,
                allow_partial,
                dry_run,
            };
            commands::inject::run(&cli.config, targets, flags)?;
        }
        Commands::Status { targets } => {
            commands::status::run(&cli.config, targets)?;
        }
    }

    Ok(())
}
