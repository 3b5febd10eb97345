//! Error types for tradelog
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for tradelog operations
///
/// Covers journal mutations, backup parsing, configuration loading and
/// the local persistence layer.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input failed validation (blank names, bad prices, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session matches the given identifier
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// No trade matches the given identifier
    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    /// A trade was added without a target and no session is active
    #[error("No active session. Create one with `tradelog session new <name>`")]
    NoActiveSession,

    /// An identifier prefix matched more than one record
    #[error("Ambiguous id '{prefix}': matches {matches} records")]
    AmbiguousId {
        /// The prefix supplied by the user
        prefix: String,
        /// How many records it matched
        matches: usize,
    },

    /// A backup document could not be imported
    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    /// Journal storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for tradelog operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
