//! CLI module for Pattern Atlas
//!
//! Provides catalog commands:
//! - `search`: Ranked keyword search with category and tag filters
//! - `show`: Full details of one pattern
//! - `list` / `categories` / `stats`: Browse the catalog
//! - `import`: Load patterns from a JSON or YAML file and persist them

use crate::config::AppConfig;
use crate::context::AppContext;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod catalog;
pub mod import;

/// Pattern Atlas CLI
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(about = "Searchable catalog of software reengineering patterns")]
#[command(version)]
pub struct Cli {
    /// Additional configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search patterns by keywords
    Search {
        /// Search terms (empty lists everything)
        query: Vec<String>,
        /// Only patterns in this category (exact match)
        #[arg(short, long)]
        category: Option<String>,
        /// Only patterns with any of these tags
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one pattern by ID or name
    Show {
        /// Pattern ID or name
        pattern: String,
        /// Print the pattern as JSON
        #[arg(long)]
        json: bool,
    },
    /// List patterns
    List {
        /// Only patterns in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Sort order
        #[arg(short, long, value_enum, default_value_t = ListSort::Name)]
        sort: ListSort,
    },
    /// List categories with pattern counts
    Categories,
    /// Show catalog and search statistics
    Stats,
    /// Import patterns from a JSON or YAML file
    Import {
        /// File to import
        path: PathBuf,
    },
}

/// Ordering for `atlas list`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSort {
    /// Alphabetical by name
    #[default]
    Name,
    /// Grouped by category, then by name
    Category,
}

/// Run the CLI command
pub fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let mut ctx = AppContext::initialize(config)?;

    match command {
        Commands::Search {
            query,
            category,
            tags,
            limit,
            json,
        } => catalog::search(&ctx, &query.join(" "), category, tags, limit, json),
        Commands::Show { pattern, json } => catalog::show(&ctx, &pattern, json),
        Commands::List { category, sort } => catalog::list(&ctx, category.as_deref(), sort),
        Commands::Categories => catalog::categories(&ctx),
        Commands::Stats => catalog::stats(&ctx),
        Commands::Import { path } => import::run(&mut ctx, &path),
    }
}
