//! # Billbook CLI
//!
//! Command-line front end: turns invoice drafts into stored, totalled
//! invoices and prints them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          billbook                                       │
//! │                                                                         │
//! │  .env + environment ──► CliConfig ──► Database (SQLite)  ┐              │
//! │                                       or --memory store   ├─► commands  │
//! │  argv ──► clap ──► Command ───────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use billbook_db::{Database, DbConfig, InvoiceStore, MemoryInvoiceStore};

use crate::config::CliConfig;

/// GST invoice totals, amount in words and invoice storage
#[derive(Parser)]
#[command(name = "billbook", version, about)]
struct Cli {
    /// Keep invoices in memory for this run instead of the SQLite file
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Store(StoreCommand),

    /// Print a whole rupee amount in words
    Words {
        amount: u64,
    },
}

/// Subcommands that read or write the invoice store.
#[derive(Subcommand)]
enum StoreCommand {
    /// Compute and store an invoice from a JSON draft
    Create {
        /// Draft file (InvoiceDraft as JSON)
        draft: PathBuf,
    },
    /// Print the summary of a stored invoice
    Show {
        invoice_number: String,
    },
    /// List stored invoices, oldest first
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Words needs no configuration or storage
    let cmd = match cli.cmd {
        Command::Words { amount } => {
            println!("{}", commands::render_words(amount));
            return Ok(());
        }
        Command::Store(cmd) => cmd,
    };

    // A missing .env is fine; the environment may already be set
    let dotenv_path = dotenvy::dotenv().ok();

    let config = CliConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = dotenv_path {
        debug!(path = %path.display(), "Loaded .env");
    }

    let (store, db): (Arc<dyn InvoiceStore>, Option<Database>) = if cli.memory {
        info!("Using in-memory invoice store");
        (Arc::new(MemoryInvoiceStore::new()), None)
    } else {
        let db = Database::new(
            DbConfig::new(&config.database_path).max_connections(config.max_connections),
        )
        .await?;
        (Arc::new(db.invoices()), Some(db))
    };

    let result = run(cmd, store.as_ref()).await;

    if let Some(db) = db {
        db.close().await;
    }
    result
}

async fn run(cmd: StoreCommand, store: &dyn InvoiceStore) -> anyhow::Result<()> {
    match cmd {
        StoreCommand::Create { draft } => {
            let draft = commands::read_draft(&draft).await?;
            let invoice = commands::create_from_draft(store, &draft).await?;
            println!("{}", commands::render_summary(&invoice));
        }
        StoreCommand::Show { invoice_number } => {
            let invoice = commands::find_invoice(store, &invoice_number).await?;
            println!("{}", commands::render_summary(&invoice));
        }
        StoreCommand::List => {
            println!("{}", commands::render_listing(store).await?);
        }
    }
    Ok(())
}
