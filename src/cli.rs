//! Command-line interface definition for tradelog
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for sessions, trades and backups.

use crate::journal::Direction;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tradelog - Local trade journal
///
/// Group trades into sessions, annotate them with reflections and keep
/// JSON backups of the whole journal.
#[derive(Parser, Debug, Clone)]
#[command(name = "tradelog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Path to the journal database (overrides config)
    #[arg(long = "db", env = "TRADELOG_DB")]
    pub storage_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for tradelog
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage trading sessions
    Session {
        /// Session subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Log and annotate trades
    Trade {
        /// Trade subcommand
        #[command(subcommand)]
        command: TradeCommand,
    },

    /// Write a JSON backup of the whole journal
    Export {
        /// Output file, or `-` for stdout (default: dated file in the backup directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the journal with the contents of a JSON backup
    Import {
        /// Backup file to read
        path: PathBuf,

        /// Overwrite without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show where the journal is stored and how much it holds
    Status,
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Create a session and make it active
    New {
        /// Session name
        name: String,

        /// Trading day (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Free-form session notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List all sessions
    List,

    /// Make a session the active one
    Select {
        /// Session id or unique prefix
        id: String,
    },

    /// Show a session with its trades (default: the active session)
    Show {
        /// Session id or unique prefix
        id: Option<String>,
    },

    /// Delete a session and all of its trades
    Delete {
        /// Session id or unique prefix
        id: String,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Trade subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TradeCommand {
    /// Log a trade
    Add(TradeAddArgs),

    /// Change fields of a logged trade
    Update(TradeUpdateArgs),

    /// Write or replace the reflection on a trade
    Reflect(TradeReflectArgs),

    /// Delete a trade
    Delete {
        /// Trade id or unique prefix
        id: String,
    },

    /// Show one trade with its reflection
    Show {
        /// Trade id or unique prefix
        id: String,
    },

    /// List trades of a session (default: the active session)
    List {
        /// Session id or unique prefix
        #[arg(short, long)]
        session: Option<String>,
    },
}

/// Arguments for `trade add`
#[derive(Args, Debug, Clone)]
pub struct TradeAddArgs {
    /// Instrument symbol
    #[arg(long)]
    pub symbol: String,

    /// Trade side (long or short)
    #[arg(long)]
    pub side: Direction,

    /// Entry price
    #[arg(long)]
    pub entry: f64,

    /// Position size
    #[arg(long)]
    pub qty: f64,

    /// Exit price (omit for an open trade)
    #[arg(long)]
    pub exit: Option<f64>,

    /// Commissions and fees
    #[arg(long, default_value_t = 0.0)]
    pub fees: f64,

    /// Setup or strategy label
    #[arg(long)]
    pub setup: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Notes taken when logging the trade
    #[arg(long)]
    pub notes: Option<String>,

    /// Target session id or prefix (default: the active session)
    #[arg(long)]
    pub session: Option<String>,
}

/// Arguments for `trade update`
///
/// Text fields are cleared by passing an empty string.
#[derive(Args, Debug, Clone)]
pub struct TradeUpdateArgs {
    /// Trade id or unique prefix
    pub id: String,

    #[arg(long)]
    pub symbol: Option<String>,

    #[arg(long)]
    pub side: Option<Direction>,

    #[arg(long)]
    pub entry: Option<f64>,

    #[arg(long, conflicts_with = "clear_exit")]
    pub exit: Option<f64>,

    /// Mark the trade as open again
    #[arg(long)]
    pub clear_exit: bool,

    #[arg(long)]
    pub qty: Option<f64>,

    #[arg(long)]
    pub fees: Option<f64>,

    #[arg(long)]
    pub setup: Option<String>,

    /// Replace all tags (repeatable)
    #[arg(long = "tag", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long)]
    pub clear_tags: bool,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `trade reflect`
#[derive(Args, Debug, Clone)]
pub struct TradeReflectArgs {
    /// Trade id or unique prefix
    pub id: String,

    /// What went according to plan
    #[arg(long)]
    pub went_well: Option<String>,

    /// What to do differently next time
    #[arg(long)]
    pub to_improve: Option<String>,

    /// Lesson learned
    #[arg(long)]
    pub lesson: Option<String>,

    /// Execution rating from 1 to 5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            storage_path: None,
            verbose: false,
            command: Commands::Status,
        }
    }
}
