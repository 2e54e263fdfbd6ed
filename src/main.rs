//! Rolodex CLI - serve the customer/address JSON API and inspect the store

use clap::{Parser, Subcommand};
use rolodex::config;
use rolodex::storage::SqliteStore;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(version = "0.1.0")]
#[command(about = "Customer relationship record-keeper")]
#[command(long_about = r#"
Rolodex keeps customer records and their addresses in a local SQLite
database and serves them over a small JSON API:
  • Searchable, sortable, paginated customer listing
  • One-to-many addresses per customer, removed with their owner
  • Phone numbers kept unique by the storage engine

Example usage:
  rolodex serve --port 5000
  rolodex stats --database rolodex.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the customer/address JSON API
    Serve {
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file (overrides config)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show record counts for a database
    Stats {
        /// Path to the database file (overrides config)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter rolodex.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { port, database, config: config_path } => {
            let file_config = config::load_config(config_path.as_deref())?;
            let database = config::resolve_database(database, file_config.as_ref());
            let port = config::resolve_port(port, file_config.as_ref());

            config::ensure_db_dir(&database)?;
            tracing::info!("Serving {} on port {}", database.display(), port);
            rolodex::server::start_server(port, database).await?;
        }

        Commands::Stats { database, config: config_path } => {
            let file_config = config::load_config(config_path.as_deref())?;
            let database = config::resolve_database(database, file_config.as_ref());

            let store = SqliteStore::open(&database)?;
            let stats = store.stats()?;

            println!("📊 Rolodex Statistics ({:?})", database);
            println!("------------------------------------");
            println!("{}", stats);
        }

        Commands::Init { force } => {
            let path = config::default_config_path();
            let starter = config::RolodexConfig {
                database: Some(config::default_database_path().display().to_string()),
                port: Some(config::DEFAULT_PORT),
            };
            config::write_config(&path, &starter, force)?;
            println!("✅ Wrote {}", path.display());
        }
    }

    Ok(())
}
