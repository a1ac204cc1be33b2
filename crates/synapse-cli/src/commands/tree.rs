//! Tree command - print the navigation rows

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use synapse_core::VisibleRow;
use synapse_types::NodeKind;

fn render_row(row: &VisibleRow) -> String {
    let indent = "  ".repeat(row.depth);
    match row.kind {
        NodeKind::Folder if row.is_open => format!("{}📂 {}", indent, row.name.bold()),
        NodeKind::Folder => format!("{}📁 {}", indent, row.name.bold()),
        NodeKind::File => format!("{}📄 {}", indent, row.name),
    }
}

pub async fn run(workspace: Option<&Path>, expand_all: bool, reveal: Option<String>) -> Result<()> {
    let mut ws = super::open_workspace(workspace)?;

    if expand_all {
        ws.expand_all();
    }
    if let Some(ref id) = reveal {
        if !ws.reveal(id) {
            println!("{}", format!("⚠️  No node with id '{}'", id).yellow());
        }
    }

    for row in ws.rows() {
        println!("{}  {}", render_row(&row), row.id.dimmed());
    }
    Ok(())
}
