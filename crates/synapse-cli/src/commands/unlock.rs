//! Unlock command - password-protected files

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use synapse_core::PasswordDialog;

async fn attempt(dialog: &mut PasswordDialog, password: &str) -> Result<bool> {
    if dialog.submit(password).is_err() {
        return Ok(false);
    }
    println!("{}", "🔐 Verifying...".dimmed());
    match dialog.settle().await {
        Some(Ok(())) => Ok(true),
        Some(Err(e)) if e.is_rejection() => Ok(false),
        Some(Err(e)) => Err(e.into()),
        None => anyhow::bail!("Verification was cancelled"),
    }
}

pub async fn run(workspace: Option<&Path>, id: &str, password: Option<String>) -> Result<()> {
    let ws = super::open_workspace(workspace)?;
    let mut dialog = ws
        .password_dialog(id)
        .with_context(|| format!("No file with id '{}'", id))?;

    println!("{}", "🔒 Password Protected File".blue().bold());
    println!("   Enter the password to access \"{}\".", dialog.file_name());
    println!();

    let unlocked = match password {
        Some(password) => attempt(&mut dialog, &password).await?,
        None => loop {
            let password: String = dialoguer::Password::new()
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?;
            if attempt(&mut dialog, &password).await? {
                break true;
            }
            if let Some(error) = dialog.error() {
                println!("   {}", error.red());
            }
        },
    };

    if !unlocked {
        let reason = dialog.error().unwrap_or("Unlock failed").to_string();
        anyhow::bail!(reason);
    }

    println!("{}", "✅ Unlocked".green().bold());
    println!("   {} is now accessible", dialog.file_name().cyan());
    Ok(())
}
