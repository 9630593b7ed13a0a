//! Import CLI command
//!
//! `atlas import <FILE>` - Load patterns from JSON or YAML and persist the catalog

use crate::context::AppContext;
use anyhow::Result;
use std::path::Path;

/// Number of failures printed before summarizing the rest
const MAX_FAILURES_SHOWN: usize = 20;

/// Import a file and print the load report
pub fn run(ctx: &mut AppContext, path: &Path) -> Result<()> {
    println!("Importing patterns from {}...", path.display());

    let report = ctx.import(path)?;

    println!("  {report}");
    for failure in report.failures.iter().take(MAX_FAILURES_SHOWN) {
        println!("  ⚠️ {failure}");
    }
    if report.failures.len() > MAX_FAILURES_SHOWN {
        println!(
            "  ... and {} more",
            report.failures.len() - MAX_FAILURES_SHOWN
        );
    }

    if report.succeeded > 0 {
        println!(
            "\n✅ Catalog saved to {} ({} patterns).",
            ctx.storage().path().display(),
            ctx.repository().count()
        );
    } else {
        println!("\nNothing imported; catalog unchanged.");
    }

    Ok(())
}
