//! Open command - show a file preview

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use synapse_core::RowActivation;

pub async fn run(workspace: Option<&Path>, id: &str) -> Result<()> {
    let mut ws = super::open_workspace(workspace)?;

    match ws.activate_row(id) {
        RowActivation::Opened => {}
        RowActivation::Toggled { .. } => anyhow::bail!("'{}' is a folder; use `synapse tree --reveal`", id),
        RowActivation::Ignored => anyhow::bail!("No node with id '{}'", id),
    }

    let preview = ws
        .router()
        .preview()
        .ok_or_else(|| anyhow::anyhow!("No preview for '{}'", id))?;

    println!("{} {}", "📄".cyan(), preview.file_name().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", preview.content());
    Ok(())
}
