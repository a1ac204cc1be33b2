//! Info command - file metadata tooltip

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub async fn run(workspace: Option<&Path>, id: &str) -> Result<()> {
    let ws = super::open_workspace(workspace)?;
    let tree = ws.tree();

    let node = tree
        .find_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("No node with id '{}'", id))?;
    let path: Vec<&str> = tree
        .ancestors_of(id)
        .unwrap_or_default()
        .iter()
        .map(|n| n.name.as_str())
        .chain(std::iter::once(node.name.as_str()))
        .collect();

    println!("{} {}", "ℹ️ ".cyan(), node.name.bold());
    println!("   Path:     {}", path.join("/").dimmed());
    println!("   Kind:     {}", node.kind);

    if node.is_folder() {
        println!("   Items:    {}", node.children.len());
        return Ok(());
    }

    match tree.metadata(id) {
        Some(meta) => {
            println!("   Summary:  {}", meta.summary);
            if !meta.tags.is_empty() {
                let tags: Vec<&str> = meta.tags.iter().map(String::as_str).collect();
                println!("   Tags:     {}", tags.join(", ").cyan());
            }
            println!("   Modified: {}", meta.date_modified);
            println!("   Size:     {}", meta.size);
        }
        None => println!("   {}", "No metadata available".dimmed()),
    }
    Ok(())
}
