//! Synapse CLI
//!
//! Browse a workspace tree, filter files and ask the assistant about them.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use synapse_core::ops::CloudProvider;
use synapse_types::{SearchFilters, SearchScope};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "synapse")]
#[command(author, version, about = "Synapse - workspace navigation and search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace manifest file, or a directory containing one
    #[arg(short, long, global = true, env = "SYNAPSE_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// User name (prompts if not provided)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show the workspace tree
    Tree {
        /// Open every folder
        #[arg(short, long)]
        expand_all: bool,

        /// Open the folders leading to this node
        #[arg(short, long)]
        reveal: Option<String>,
    },

    /// List files matching a query and filters
    Search(FilterArgs),

    /// Search, then ask the assistant about the query
    Ask(FilterArgs),

    /// Open a file preview
    Open {
        /// Node id
        id: String,
    },

    /// Show file metadata
    Info {
        /// Node id
        id: String,
    },

    /// Convert a file to another format
    Convert {
        /// Node id
        id: String,

        /// Target format
        #[arg(short, long)]
        to: String,
    },

    /// Connect cloud providers and sync
    Sync {
        /// Connect or disconnect a provider (onedrive, googledrive)
        #[arg(short, long = "toggle")]
        toggle: Vec<CloudProvider>,

        /// Show connection status without syncing
        #[arg(long)]
        status: bool,
    },

    /// Unlock a password-protected file
    Unlock {
        /// Node id
        id: String,

        /// Password (prompts if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List conversion targets for a format
    Formats {
        /// Source extension, e.g. pdf
        format: String,
    },
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Search text
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Earliest modification date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<chrono::NaiveDate>,

    /// Latest modification date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<chrono::NaiveDate>,

    /// Folder name to search within ("all" for everywhere)
    #[arg(short, long)]
    dir: Option<String>,

    /// File extension ("all" for any)
    #[arg(short = 't', long = "type")]
    file_type: Option<String>,

    /// Match against filename, content or both
    #[arg(short = 'i', long = "in", default_value = "both")]
    search_in: SearchScope,
}

impl FilterArgs {
    fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.query.join(" "),
            date_from: self.from,
            date_to: self.to,
            directory: self.dir.clone(),
            file_type: self.file_type.clone(),
            search_in: self.search_in,
        }
        .normalized()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "synapse_cli=debug,synapse_core=debug"
    } else {
        "synapse_cli=info"
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("Starting Synapse CLI");

    let workspace = cli.workspace.as_deref();
    let result = match cli.command {
        Commands::Login { user } => commands::auth::login(user).await,
        Commands::Logout => commands::auth::logout().await,
        Commands::Whoami => commands::auth::whoami().await,
        Commands::Tree { expand_all, reveal } => commands::tree::run(workspace, expand_all, reveal).await,
        Commands::Search(args) => commands::search::run(workspace, &args.to_filters()).await,
        Commands::Ask(args) => commands::ask::run(workspace, &args.to_filters()).await,
        Commands::Open { id } => commands::open::run(workspace, &id).await,
        Commands::Info { id } => commands::info::run(workspace, &id).await,
        Commands::Convert { id, to } => commands::convert::run(workspace, &id, &to).await,
        Commands::Sync { toggle, status } => commands::sync::run(workspace, toggle, status).await,
        Commands::Unlock { id, password } => commands::unlock::run(workspace, &id, password).await,
        Commands::Formats { format } => commands::formats::run(&format).await,
    };

    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_map_sentinels() {
        let cli = Cli::parse_from([
            "synapse", "search", "q4", "report", "--dir", "all", "--type", ".PDF", "--in", "content",
        ]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        let filters = args.to_filters();
        assert_eq!(filters.query, "q4 report");
        assert_eq!(filters.directory, None);
        assert_eq!(filters.file_type.as_deref(), Some("PDF"));
        assert_eq!(filters.search_in, SearchScope::Content);
        assert_eq!(filters.active_facet_count(), 1);
    }

    #[test]
    fn test_sync_toggles_parse() {
        let cli = Cli::parse_from(["synapse", "sync", "--toggle", "onedrive", "--toggle", "google-drive"]);
        let Commands::Sync { toggle, status } = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(toggle, vec![CloudProvider::OneDrive, CloudProvider::GoogleDrive]);
        assert!(!status);
    }
}
