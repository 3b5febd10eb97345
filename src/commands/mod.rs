/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `session`: create, list, select, show and delete sessions
- `trade`: add, update, reflect on, delete and list trades
- `backup`: JSON export and import
- `status`: storage location and journal size

Every mutating handler loads the journal from storage, applies exactly one
journal operation and saves the result.
*/

use crate::config::{Config, DisplayConfig};
use crate::error::{JournalError, Result};
use crate::journal::Outcome;
use crate::storage::SqliteStorage;
use colored::{ColoredString, Colorize};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod backup;
pub mod session;
pub mod status;
pub mod trade;

/// Open the journal storage described by the configuration
pub fn open_storage(config: &Config) -> Result<SqliteStorage> {
    SqliteStorage::from_config(&config.storage)
}

/// Ask a yes/no question on the terminal
///
/// Anything but `y`/`yes` declines, and so does end of input, so piping
/// nothing into a destructive command never confirms it.
pub fn confirm(question: &str) -> Result<bool> {
    let mut rl = DefaultEditor::new()?;
    match rl.readline(&format!("{} [y/N] ", question)) {
        Ok(line) => Ok(matches!(
            line.trim().to_lowercase().as_str(),
            "y" | "yes"
        )),
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(false),
        Err(e) => Err(JournalError::Readline(e).into()),
    }
}

/// First eight characters of an id, enough to type back as a prefix
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Shorten text to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Signed money amount, e.g. `+$12.50` or `-$3.00`
pub fn format_money(value: f64, display: &DisplayConfig) -> String {
    let sign = if value < 0.0 { "-" } else { "+" };
    format!("{}{}{:.2}", sign, display.currency_symbol, value.abs())
}

/// Money amount colored by sign; `-` for trades without a result
pub fn colored_pnl(value: Option<f64>, display: &DisplayConfig) -> ColoredString {
    let Some(v) = value else {
        return "-".dimmed();
    };
    match Outcome::from_pnl(v) {
        Outcome::Win => format_money(v, display).green(),
        Outcome::Loss => format_money(v, display).red(),
        _ => format_money(0.0, display).normal(),
    }
}

/// Plain price formatting that drops needless trailing zeros
pub fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
