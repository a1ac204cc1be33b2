//! Sync command - cloud provider connections and manual sync

use crate::config::SettingsManager;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use synapse_core::ops::{CloudProvider, SyncSettings};

fn print_status(settings: &SyncSettings) {
    println!("{}", "☁️  Cloud sync".blue().bold());
    for provider in CloudProvider::ALL {
        let label = settings.status_label(provider);
        let label = if settings.is_connected(provider) {
            label.green()
        } else {
            label.dimmed()
        };
        println!("   {:<14} {}", provider.display_name(), label);
    }
    println!("   Last sync:     {}", settings.last_sync_label());
}

pub async fn run(workspace: Option<&Path>, toggle: Vec<CloudProvider>, status_only: bool) -> Result<()> {
    let ws = super::open_workspace(workspace)?;
    let mut dialog = ws.sync_dialog(SettingsManager::load_sync()?);

    for provider in toggle {
        let connected = dialog.toggle(provider);
        let verb = if connected { "Connected" } else { "Disconnected" };
        println!("   {} {}", verb, provider.display_name().cyan());
    }
    SettingsManager::save_sync(dialog.settings())?;

    if status_only || !dialog.settings().has_connection() {
        print_status(dialog.settings());
        return Ok(());
    }

    dialog.sync_now()?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Syncing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = dialog.settle().await;
    spinner.finish_and_clear();
    outcome.context("Sync was cancelled")??;

    SettingsManager::save_sync(dialog.settings())?;
    println!("{}", "✅ Sync complete".green().bold());
    print_status(dialog.settings());
    Ok(())
}
