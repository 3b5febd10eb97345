//! tradelog - Local trade journal library
//!
//! This library provides the core functionality behind the `tradelog` CLI:
//! the session/trade state container, JSON backups, local persistence and
//! configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `journal`: Sessions, trades, reflections and the operations on them
//! - `backup`: JSON export and validated import
//! - `storage`: SQLite-backed key/value persistence of the journal document
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers wiring the CLI to the library
//!
//! # Example
//!
//! ```
//! use tradelog::journal::{Direction, JournalState, NewTrade};
//!
//! let mut journal = JournalState::new();
//! journal.create_session("Monday open", None, None)?;
//! let id = journal.add_trade(None, NewTrade::new("ES", Direction::Long, 5000.0, 1.0).with_exit(5004.0))?;
//! assert_eq!(journal.find_trade(&id)?.1.pnl(), Some(4.0));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod backup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{JournalError, Result};
pub use journal::{JournalState, Session, Trade};
pub use storage::SqliteStorage;

#[cfg(test)]
pub mod test_utils;
