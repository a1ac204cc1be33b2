//! Convert command - simulated format conversion

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

pub async fn run(workspace: Option<&Path>, id: &str, to: &str) -> Result<()> {
    let ws = super::open_workspace(workspace)?;
    let mut dialog = ws
        .conversion_dialog(id)
        .with_context(|| format!("No file with id '{}'", id))?;

    let file_name = ws.tree().find_by_id(id).map(|n| n.name.clone()).unwrap_or_default();
    println!("{} Converting {} ({} → {})", "🔄".cyan(), file_name.bold(), dialog.current_format(), to);

    dialog.start(to)?;

    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::with_template("   [{bar:40.cyan/blue}] {pos:>3}%")?.progress_chars("=> "));
    let outcome = dialog
        .settle_with_progress(|percent| bar.set_position(u64::from(percent)))
        .await;
    bar.finish_and_clear();

    let converted = outcome.context("Conversion was cancelled")??;
    println!("{}", "✅ Conversion complete".green().bold());
    println!("   Output: {}", converted.file_name.cyan());
    println!("   {}", "The workspace tree is unchanged".dimmed());
    Ok(())
}
