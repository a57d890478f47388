pub mod dashboard;
pub mod init;
pub mod records;
pub mod settings;
pub mod status;
pub mod transfer;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::db::Store;
use crate::error::Result;
use crate::state::AppState;

/// Open the store and load everything in it.
pub(crate) fn open(data_dir: &Path) -> Result<(Store, AppState)> {
    let store = Store::open(data_dir)?;
    let state = store.load()?;
    Ok((store, state))
}

#[derive(Parser)]
#[command(name = "spendlog", version, about = "Track personal spending from the terminal.")]
pub struct Cli {
    /// Data directory (overrides SPENDLOG_DATA_DIR and the config file)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the store.
    Init {
        /// Path for spendlog data (default: ~/Documents/spendlog)
        path: Option<String>,
    },
    /// Record a new transaction.
    Add {
        /// What the money was spent on, e.g. 'Lunch at cafeteria'
        description: String,
        /// Amount: 0, 10, 10.5 or 10.50
        amount: String,
        /// Category: letters, spaces and hyphens
        #[arg(long)]
        category: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Receipt link (http:// or https://)
        #[arg(long)]
        receipt: Option<String>,
    },
    /// Change fields of an existing transaction.
    Edit {
        /// Record ID, e.g. rec_0001
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// New receipt link; pass an empty string to remove it
        #[arg(long)]
        receipt: Option<String>,
    },
    /// Show one transaction as JSON.
    Show {
        /// Record ID, e.g. rec_0001
        id: String,
    },
    /// Delete a transaction.
    Delete {
        /// Record ID, e.g. rec_0001
        id: String,
    },
    /// List transactions, optionally filtered by a regex and sorted.
    List {
        /// Regex matched against date, description, category, amount and receipt
        #[arg(long, short)]
        search: Option<String>,
        /// Match the search pattern case-sensitively
        #[arg(long = "case-sensitive")]
        case_sensitive: bool,
        /// date_asc, date_desc, desc_asc, desc_desc, amt_asc, amt_desc
        #[arg(long, default_value = "date_desc")]
        sort: String,
        /// Emit an HTML table with <mark> highlights instead of a terminal table
        #[arg(long)]
        html: bool,
    },
    /// Totals, top category, cap status and the last 7 days.
    Dashboard,
    /// View or change settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Write all records as JSON.
    Export {
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace all records with the contents of a JSON file.
    Import {
        /// Path to a JSON array of records
        file: String,
    },
    /// Print a one-record JSON template in the import format.
    Seed {
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the data location and record count.
    Status,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings.
    Show,
    /// Set the base currency code.
    Currency {
        /// Three-letter code, e.g. RWF
        code: String,
    },
    /// Set conversion rates from the base currency.
    Rates {
        /// Base to USD rate; pass an empty string to unset, omit to keep
        #[arg(long)]
        usd: Option<String>,
        /// Base to EUR rate; pass an empty string to unset, omit to keep
        #[arg(long)]
        eur: Option<String>,
    },
    /// Set the spending cap; omit the value to remove it.
    Cap {
        value: Option<String>,
    },
    /// Replace the category list.
    Categories {
        /// Comma-separated, e.g. 'Food, Bus Pass, Take-out'
        list: String,
    },
    /// Set or toggle the theme.
    Theme {
        /// light, dark or toggle
        mode: String,
    },
}
