//! Search command - list matching files

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use synapse_core::MatchSource;
use synapse_types::SearchFilters;

/// Print the query line with the "Filters (n)" badge
pub fn print_request(filters: &SearchFilters) {
    let count = filters.active_facet_count();
    let badge = if count > 0 {
        format!(" Filters ({})", count).yellow().to_string()
    } else {
        String::new()
    };
    println!("{} {}{}", "🔍".cyan(), filters.to_prompt().bold(), badge);
}

pub async fn run(workspace: Option<&Path>, filters: &SearchFilters) -> Result<()> {
    filters.validate()?;
    let ws = super::open_workspace(workspace)?;

    print_request(filters);
    println!();

    let hits = ws.search(filters);
    if hits.is_empty() {
        println!("{}", "No files matched".dimmed());
        return Ok(());
    }

    for hit in &hits {
        let source = match hit.matched_in {
            MatchSource::Filename => "name",
            MatchSource::Content => "content",
        };
        println!("  📄 {}  {}  {}", hit.path, hit.node.id.dimmed(), format!("[{}]", source).dimmed());
    }
    println!();
    println!("{} file(s)", hits.len().to_string().green());
    Ok(())
}
