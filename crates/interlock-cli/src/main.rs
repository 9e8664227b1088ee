//! Interlock CLI - Command-line interface for Interlock
//!
//! Loads a relationship edge list and answers connection queries about
//! the entities in it.

use clap::{Parser, Subcommand};
use colored::Colorize;
use interlock_core::EntityId;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "interlock")]
#[command(author = "Interlock Contributors")]
#[command(version)]
#[command(about = "Degrees of separation and interlocks over relationship networks", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config to .interlock/config.json
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List connected entities grouped by degree of separation
    Degrees {
        /// JSON edge list
        file: PathBuf,

        /// Root entity id (repeat for several roots)
        #[arg(short, long = "root", required = true)]
        roots: Vec<EntityId>,

        /// Maximum hops to search
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List relationships grouped by hop from the roots
    Edges {
        /// JSON edge list
        file: PathBuf,

        /// Root entity id (repeat for several roots)
        #[arg(short, long = "root", required = true)]
        roots: Vec<EntityId>,

        /// Maximum hops to search
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Rank second-degree interlocks by shared relationships
    Interlocks {
        /// JSON edge list
        file: PathBuf,

        /// Root entity id (repeat for several roots)
        #[arg(short, long = "root", required = true)]
        roots: Vec<EntityId>,

        /// Maximum results to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show graph statistics
    Stats {
        /// JSON edge list
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    if let Err(e) = run(cli.command, working_dir_config) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn working_dir_config() -> commands::Result<Config> {
    Ok(Config::load(&std::env::current_dir()?)?)
}

/// Runs a command. `load_config` is only called for flags left unset.
fn run<F>(command: Commands, load_config: F) -> commands::Result<()>
where
    F: Fn() -> commands::Result<Config>,
{
    match command {
        Commands::Init { path } => commands::init(&path),
        Commands::Degrees {
            file,
            roots,
            depth,
            json,
        } => {
            let depth = match depth {
                Some(depth) => depth,
                None => load_config()?.depth,
            };
            commands::degrees(&file, &roots, depth, json)
        }
        Commands::Edges {
            file,
            roots,
            depth,
            json,
        } => {
            let depth = match depth {
                Some(depth) => depth,
                None => load_config()?.depth,
            };
            commands::edges(&file, &roots, depth, json)
        }
        Commands::Interlocks {
            file,
            roots,
            limit,
            json,
        } => {
            let limit = match limit {
                Some(limit) => limit,
                None => load_config()?.limit,
            };
            commands::interlocks(&file, &roots, limit, json)
        }
        Commands::Stats { file } => commands::stats(&file),
    }
}
