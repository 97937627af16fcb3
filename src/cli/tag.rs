//! Tag CLI commands
//!
//! Manual edits to the tag overlay and the sub-account label lists.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Subcommand;

use crate::error::{PnlError, PnlResult};
use crate::ledger::ingest_file;
use crate::models::{TagCategory, TransactionId};
use crate::services::TagService;
use crate::storage::Storage;

/// Tag subcommands
#[derive(Subcommand)]
pub enum TagCommands {
    /// Tag a transaction, excluding it from computed totals
    Add {
        /// Transaction id (as shown by report/orphans output)
        id: String,
        /// Tag category (personal or non-recurring)
        category: String,
        /// Sub-account label (e.g. "Personal Meals")
        sub_account: String,
        /// Path to the ledger export file
        #[arg(short, long, env = "PNLVIEW_LEDGER")]
        ledger: PathBuf,
    },
    /// Remove the tag from a transaction
    Remove {
        /// Transaction id
        id: String,
    },
    /// List all tagged transactions
    List,
    /// Show the configured sub-account labels
    Labels,
}

/// Handle a tag command
pub fn handle_tag_command(storage: &Storage, cmd: TagCommands) -> PnlResult<()> {
    let service = TagService::new(storage);

    match cmd {
        TagCommands::Add {
            id,
            category,
            sub_account,
            ledger,
        } => {
            let category = TagCategory::from_str(&category).map_err(PnlError::Validation)?;
            let snapshot = ingest_file(&ledger)?;
            let id = TransactionId::from_string(id);
            let tag = service.tag(&snapshot, &id, category, &sub_account)?;
            println!("Tagged {} as {} / {}", id, tag.category, tag.sub_account);
        }

        TagCommands::Remove { id } => {
            let id = TransactionId::from_string(id);
            service.untag(&id)?;
            println!("Removed tag from {}", id);
        }

        TagCommands::List => {
            let overlay = service.overlay()?;
            if overlay.is_empty() {
                println!("No tagged transactions.");
            } else {
                for (id, tag) in &overlay {
                    println!("  {}  {} / {}", id, tag.category, tag.sub_account);
                }
                println!("{} tagged transactions", overlay.len());
            }
        }

        TagCommands::Labels => {
            let config = storage.tags.config()?;
            println!("Personal:");
            for label in config.labels(TagCategory::Personal) {
                println!("  {}", label);
            }
            println!("Non-recurring:");
            for label in config.labels(TagCategory::NonRecurring) {
                println!("  {}", label);
            }
        }
    }

    Ok(())
}
