//! Pattern Atlas - Reengineering Pattern Catalog
//!
//! CLI entry point for the `atlas` binary.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod context;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = &config.log_level;
                format!("atlas={level},atlas_catalog={level},atlas_search={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting Pattern Atlas v{}", env!("CARGO_PKG_VERSION"));

    cli::run(cli, config)
}
