//! P&L report command

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use crate::error::{PnlError, PnlResult};
use crate::ledger::ingest_file;
use crate::models::Section;
use crate::reports::PlStatement;
use crate::storage::Storage;

/// Arguments for the report command
#[derive(Args)]
pub struct ReportArgs {
    /// Path to the ledger export file
    #[arg(short, long, env = "PNLVIEW_LEDGER")]
    pub ledger: PathBuf,

    /// Limit output to one section (revenue, cogs, cost-of-sales, opex, other-income)
    #[arg(short, long)]
    pub section: Option<String>,

    /// Emit CSV instead of the terminal table
    #[arg(long)]
    pub csv: bool,
}

/// Handle the report command
pub fn handle_report_command(storage: &Storage, args: ReportArgs) -> PnlResult<()> {
    let snapshot = ingest_file(&args.ledger)?;
    let overlay = storage.tags.get_all()?;

    let statement = match &args.section {
        Some(name) => {
            let section = Section::from_str(name).map_err(PnlError::Validation)?;
            PlStatement {
                months: snapshot.months.clone(),
                sections: vec![PlStatement::generate_section(section, &snapshot, &overlay)],
            }
        }
        None => PlStatement::generate(&snapshot, &overlay),
    };

    if args.csv {
        let stdout = std::io::stdout();
        statement.export_csv(&mut stdout.lock())?;
    } else {
        print!("{}", statement.format_terminal());
    }

    Ok(())
}
