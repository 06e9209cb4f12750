//! Harbormap CLI
//!
//! Loads container maps written in shorthand and reports their canonical form.

use anyhow::Result;
use clap::{Parser, Subcommand};
use harbormap_core::TagRegistry;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Harbormap - normalize volume, link, and port shorthand
#[derive(Parser)]
#[command(name = "harbormap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Container map file, or directory containing containers.yaml
    #[arg(short, long, default_value = "containers.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML tag read as a resolvable placeholder (repeatable)
    #[arg(
        long = "lazy-tag",
        value_name = "TAG",
        env = "HARBORMAP_LAZY_TAGS",
        value_delimiter = ','
    )]
    lazy_tags: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the container map without printing it
    Validate,

    /// Print normalized records as JSON
    Normalize {
        /// Print a single container only
        #[arg(long)]
        container: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let registry = cli
        .lazy_tags
        .iter()
        .fold(TagRegistry::new(), |registry, tag| registry.with_tag(tag));

    match cli.command {
        Commands::Validate => {
            commands::validate::run(&cli.config, &registry).await?;
        }
        Commands::Normalize { container } => {
            commands::normalize::run(&cli.config, container.as_deref(), &registry).await?;
        }
    }

    Ok(())
}
