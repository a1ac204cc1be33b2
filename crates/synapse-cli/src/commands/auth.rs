//! Sign-in commands

use crate::config::SettingsManager;
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn login(user: Option<String>) -> Result<()> {
    println!("{}", "🔹 Sign in to Synapse".blue().bold());
    println!();

    let user = match user {
        Some(user) => user,
        None => dialoguer::Input::<String>::new()
            .with_prompt("User")
            .interact_text()
            .context("Failed to read user name")?,
    };
    let user = user.trim();
    if user.is_empty() {
        anyhow::bail!("User name is required");
    }

    let session = SettingsManager::session_store()?.sign_in(user)?;

    println!("{}", "✅ Signed in".green().bold());
    println!();
    println!("   Welcome, {}!", session.user.cyan());
    Ok(())
}

pub async fn logout() -> Result<()> {
    if SettingsManager::session_store()?.sign_out()? {
        println!("{}", "✅ Signed out".green());
    } else {
        println!("{}", "⚠️  Not signed in".yellow());
    }
    Ok(())
}

pub async fn whoami() -> Result<()> {
    match SettingsManager::session_store()?.load() {
        Some(session) => {
            println!("{}", "👤 Session".blue().bold());
            println!();
            println!("   User:      {}", session.user.cyan());
            println!(
                "   Signed in: {}",
                session.signed_in_at.format("%Y-%m-%d %H:%M UTC").to_string().dimmed()
            );
        }
        None => println!("{}", "⚠️  Not signed in".yellow()),
    }
    Ok(())
}
