//! Ask command - route a search to the assistant

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use synapse_types::{Role, SearchFilters};

pub async fn run(workspace: Option<&Path>, filters: &SearchFilters) -> Result<()> {
    let mut ws = super::open_workspace(workspace)?;

    super::search::print_request(filters);
    let matched = ws.submit(filters)?;
    println!("   {} matching file(s) passed to the assistant", matched.len().to_string().cyan());
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let reply = ws.router_mut().conversation_mut().await_reply().await;
    spinner.finish_and_clear();
    reply.context("The assistant did not answer")??;

    for message in ws.router().conversation().transcript().messages() {
        let who = match message.role {
            Role::User => "You".blue().bold(),
            Role::Assistant => "Assistant".magenta().bold(),
        };
        println!("{} {}", who, message.timestamp.format("%H:%M").to_string().dimmed());
        println!("{}", message.text);
        println!();
    }
    Ok(())
}
