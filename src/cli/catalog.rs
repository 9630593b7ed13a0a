//! Catalog CLI commands
//!
//! `atlas search`, `atlas show`, `atlas list`, `atlas categories`, `atlas stats`

use super::ListSort;
use crate::context::AppContext;
use anyhow::{bail, Result};
use atlas_catalog::Pattern;
use atlas_search::{SearchField, SearchQuery};
use serde_json::json;
use std::sync::Arc;

/// Width of one-line summaries
const SUMMARY_WIDTH: usize = 76;

/// Run a search and print ranked results
pub fn search(
    ctx: &AppContext,
    text: &str,
    category: Option<String>,
    tags: Vec<String>,
    limit: Option<usize>,
    as_json: bool,
) -> Result<()> {
    let engine = ctx.search_engine()?;

    let mut query = SearchQuery::new(text).with_tags(tags);
    if let Some(category) = category {
        query = query.in_category(category);
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let results = engine.search(&query)?;

    if as_json {
        let rows: Vec<_> = results
            .iter()
            .map(|r| {
                json!({
                    "score": r.score,
                    "matched_fields": r.matched_fields,
                    "pattern": r.pattern.as_ref(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No patterns found.");
        println!("Try fewer keywords, or run 'atlas categories' to see what is available.");
        return Ok(());
    }

    if text.trim().is_empty() {
        println!("{} patterns:\n", results.len());
    } else {
        println!("Found {} patterns for \"{}\":\n", results.len(), text.trim());
    }

    for (i, r) in results.iter().enumerate() {
        println!(
            "{:>3}. {} [{}]  score {:.2}",
            i + 1,
            r.pattern.name(),
            r.pattern.category(),
            r.score
        );
        println!("     {}", truncate(r.pattern.intent(), SUMMARY_WIDTH));
        if !r.matched_fields.is_empty() {
            println!("     matched: {}", join_fields(r.matched_fields.iter()));
        }
    }

    Ok(())
}

/// Print one pattern in full
pub fn show(ctx: &AppContext, key: &str, as_json: bool) -> Result<()> {
    let Some(pattern) = ctx.repository().get_by_id_or_name(key) else {
        bail!("Pattern not found: {key}\nHint: use 'atlas list' to see all available patterns");
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(pattern.as_ref())?);
        return Ok(());
    }

    print!("{}", render_pattern(&pattern));
    Ok(())
}

/// List patterns, optionally in one category
pub fn list(ctx: &AppContext, category: Option<&str>, sort: ListSort) -> Result<()> {
    let mut patterns = match category {
        Some(category) => ctx.repository().list_by_category(category),
        None => ctx.repository().list_all(),
    };
    sort_patterns(&mut patterns, sort);

    if patterns.is_empty() {
        match category {
            Some(category) => println!("No patterns in category '{category}'."),
            None => println!("The catalog is empty. Run 'atlas import <FILE>' to add patterns."),
        }
        return Ok(());
    }

    let name_width = patterns
        .iter()
        .map(|p| p.name().chars().count())
        .max()
        .unwrap_or(0);

    println!("Patterns ({} total):\n", patterns.len());
    for (i, p) in patterns.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {:<30}  {}",
            i + 1,
            p.name(),
            p.category(),
            short_tags(p),
            width = name_width
        );
    }

    Ok(())
}

/// Print categories with pattern counts
pub fn categories(ctx: &AppContext) -> Result<()> {
    let counts = ctx.repository().category_counts();
    if counts.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    let width = counts.keys().map(|c| c.chars().count()).max().unwrap_or(0).max(5);

    println!("Pattern categories:\n");
    for (category, count) in &counts {
        println!("  {:<width$}  {:>4}", category, count, width = width);
    }
    println!("  {:<width$}  {:>4}", "TOTAL", ctx.repository().count(), width = width);

    Ok(())
}

/// Print catalog, load, and search statistics
pub fn stats(ctx: &AppContext) -> Result<()> {
    let repo_stats = ctx.repository().stats();
    let search_stats = ctx.search_engine()?.stats();

    println!("Pattern Atlas v{}", env!("CARGO_PKG_VERSION"));
    println!("  Source:          {}", ctx.source());
    println!("  Store file:      {}", ctx.storage().path().display());
    println!("  Total patterns:  {}", repo_stats.total_patterns);
    println!("  Categories:      {}", repo_stats.total_categories);

    if let Some(report) = ctx.load_report() {
        println!("  Load time:       {:.2}ms", report.duration_ms());
        println!("  Load success:    {:.1}%", report.success_rate());
        for failure in report.failures.iter().take(5) {
            println!("    ⚠️ {failure}");
        }
        if report.failures.len() > 5 {
            println!("    ... and {} more", report.failures.len() - 5);
        }
    }

    println!("\nSearch:");
    println!("  Default limit:   {}", ctx.config().search.default_limit);
    println!(
        "  Match scores:    exact {:.1}, partial {:.1}",
        search_stats.exact_match_score, search_stats.partial_match_score
    );
    let weights: Vec<_> = SearchField::ALL
        .iter()
        .map(|f| format!("{f} {:.1}", search_stats.field_weights.weight(*f)))
        .collect();
    println!("  Field weights:   {}", weights.join(", "));

    Ok(())
}

fn render_pattern(p: &Pattern) -> String {
    let mut out = String::new();
    let rule = "=".repeat(p.name().chars().count().max(20));

    out.push_str(&format!("{}\n{}\n", p.name(), rule));
    out.push_str(&format!("ID:       {}\n", p.id()));
    out.push_str(&format!("Category: {}\n", p.category()));
    if !p.tags().is_empty() {
        out.push_str(&format!("Tags:     {}\n", p.tags().join(", ")));
    }

    let source = p.source_metadata();
    let mut source_line = source.source_name.clone();
    if !source.authors.is_empty() {
        source_line.push_str(&format!(" by {}", source.authors.join(", ")));
    }
    if let Some(year) = source.publication_year {
        source_line.push_str(&format!(" ({year})"));
    }
    out.push_str(&format!("Source:   {source_line}\n"));
    if let Some(url) = &source.url {
        out.push_str(&format!("URL:      {url}\n"));
    }

    for (title, body) in [
        ("Intent", p.intent()),
        ("Context", p.context()),
        ("Problem", p.problem()),
        ("Solution", p.solution()),
        ("Consequences", p.consequences()),
    ] {
        if !body.is_empty() {
            out.push_str(&format!("\n{title}\n  {body}\n"));
        }
    }

    if !p.related_patterns().is_empty() {
        out.push_str("\nRelated Patterns\n");
        for related in p.related_patterns() {
            out.push_str(&format!("  - {related}\n"));
        }
    }

    out
}

fn short_tags(p: &Pattern) -> String {
    let tags = p.tags();
    let mut shown = tags.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if tags.len() > 3 {
        shown.push_str("...");
    }
    shown
}

fn join_fields<'a>(fields: impl Iterator<Item = &'a SearchField>) -> String {
    fields.map(SearchField::as_str).collect::<Vec<_>>().join(", ")
}

/// Cut `text` to at most `max` characters, ending in "..." when shortened
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

fn sort_patterns(patterns: &mut [Arc<Pattern>], sort: ListSort) {
    match sort {
        ListSort::Name => patterns.sort_by_key(|p| p.name_key()),
        ListSort::Category => patterns.sort_by(|a, b| {
            a.category()
                .cmp(b.category())
                .then_with(|| a.name_key().cmp(&b.name_key()))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_catalog::{PatternRecord, SourceMetadata};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a long sentence here", 10), "a long...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    fn pattern(name: &str, category: &str) -> Arc<Pattern> {
        Arc::new(
            PatternRecord::new(name, category, "i", "p", "s", SourceMetadata::new("OORP"))
                .into_pattern()
                .unwrap(),
        )
    }

    #[test]
    fn test_sort_patterns() {
        let mut patterns = vec![
            pattern("speculate about Design", "Initial Understanding"),
            pattern("Analyze the Persistent Data", "Initial Understanding"),
            pattern("Chat with the Maintainers", "First Contact"),
        ];

        sort_patterns(&mut patterns, ListSort::Name);
        let names: Vec<_> = patterns.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["Analyze the Persistent Data", "Chat with the Maintainers", "speculate about Design"]
        );

        sort_patterns(&mut patterns, ListSort::Category);
        let names: Vec<_> = patterns.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["Chat with the Maintainers", "Analyze the Persistent Data", "speculate about Design"]
        );
    }

    #[test]
    fn test_render_pattern_sections() {
        let pattern = PatternRecord::new(
            "Split Up God Class",
            "Redistribute Responsibilities",
            "Split a god class",
            "One class does everything",
            "Move behaviour out",
            SourceMetadata::new("OORP").with_year(2002),
        )
        .with_tags(["refactoring"])
        .with_related(["Move Behavior Close to Data"])
        .into_pattern()
        .unwrap();

        let text = render_pattern(&pattern);

        assert!(text.starts_with("Split Up God Class\n"));
        assert!(text.contains("Source:   OORP (2002)"));
        assert!(text.contains("\nProblem\n  One class does everything\n"));
        assert!(text.contains("  - Move Behavior Close to Data"));
        // Empty sections are left out
        assert!(!text.contains("Consequences"));
        assert!(!text.contains("URL:"));
    }
}
