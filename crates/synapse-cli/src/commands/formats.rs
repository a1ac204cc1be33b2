//! Formats command - conversion targets

use anyhow::Result;
use colored::Colorize;
use synapse_core::ops::available_targets;

pub async fn run(format: &str) -> Result<()> {
    let format = format.trim_start_matches('.').to_lowercase();
    let targets = available_targets(&format);

    if targets.is_empty() {
        println!("{}", format!("⚠️  No conversions available for .{}", format).yellow());
        return Ok(());
    }

    println!("{} .{} can be converted to:", "🔄".cyan(), format.bold());
    for target in targets {
        println!("   • {}", target.cyan());
    }
    Ok(())
}
