// src/main.rs

//! kamkalima-chef: Kamkalima content aggregation CLI
//!
//! Fetches audio and text lessons from the Kamkalima API and assembles
//! them into a publishable content tree.

use std::path::Path;

use clap::{Parser, Subcommand};
use env_logger::Env;

use kamkalima_chef::config::{load_config, load_credentials};
use kamkalima_chef::error::Result;
use kamkalima_chef::pipeline::{run_pipeline, run_validate};

#[derive(Parser, Debug)]
#[command(
    name = "kamkalima-chef",
    version,
    about = "Aggregates Kamkalima audio and text lessons into a publishable content tree"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, group, render, and assemble the channel tree
    Build {
        /// Clear the package cache before rendering
        #[arg(long)]
        update: bool,
    },
    /// Validate configuration and credentials
    Validate,
}

/// Main entry point
fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = load_config(Path::new(&cli.config));
    config.validate()?;

    match cli.command {
        Command::Build { update } => {
            let auth = load_credentials(Path::new(&config.paths.credentials))?;
            run_pipeline(&config, &auth, update)?;
        }
        Command::Validate => run_validate(&config)?,
    }

    Ok(())
}
