//! JSON backup export and import
//!
//! A backup is the whole journal serialized as one JSON document:
//!
//! ```json
//! { "version": 1, "exportedAt": "...", "sessions": [...], "activeSessionId": "..." }
//! ```
//!
//! Import only demands that the document is an object whose `sessions`
//! field is an array of well-formed sessions. Everything else is optional.

use crate::error::{JournalError, Result};
use crate::journal::{check_session, JournalState, Session};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Format version written into exported backups
pub const BACKUP_VERSION: u32 = 1;

/// Serialized form of an exported journal
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub sessions: &'a [Session],
    pub active_session_id: Option<&'a str>,
}

impl<'a> Backup<'a> {
    /// Snapshot the given state for export
    pub fn of(state: &'a JournalState) -> Self {
        Self {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            sessions: &state.sessions,
            active_session_id: state.active_session_id.as_deref(),
        }
    }
}

/// File name used when no explicit output path is given
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tradelog::backup::default_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// assert_eq!(default_file_name(date), "trade-journal-backup-2024-03-04.json");
/// ```
pub fn default_file_name(date: NaiveDate) -> String {
    format!("trade-journal-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize the journal as a backup document
pub fn export_json(state: &JournalState, pretty: bool) -> Result<String> {
    let backup = Backup::of(state);
    let json = if pretty {
        serde_json::to_string_pretty(&backup)?
    } else {
        serde_json::to_string(&backup)?
    };
    Ok(json)
}

/// Write a backup document to `path`
pub fn write_backup(state: &JournalState, path: &Path, pretty: bool) -> Result<()> {
    let json = export_json(state, pretty)?;
    std::fs::write(path, json)?;
    tracing::info!(
        path = %path.display(),
        sessions = state.sessions.len(),
        "Exported journal backup"
    );
    Ok(())
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    JournalError::InvalidBackup(message.into()).into()
}

/// Parse a backup document into a journal state
///
/// # Errors
///
/// Returns `InvalidBackup` when the text is not JSON, when `sessions` is
/// missing or not an array, when a session or trade is malformed, or when
/// ids repeat.
pub fn parse_backup(contents: &str) -> Result<JournalState> {
    let value: Value =
        serde_json::from_str(contents).map_err(|e| invalid(format!("not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| invalid("top-level value must be an object"))?;

    if let Some(version) = object.get("version").and_then(Value::as_u64) {
        if version > u64::from(BACKUP_VERSION) {
            tracing::warn!(
                version,
                supported = BACKUP_VERSION,
                "Backup was written by a newer version, importing known fields only"
            );
        }
    }

    let sessions = match object.get("sessions") {
        Some(sessions) if sessions.is_array() => sessions.clone(),
        _ => return Err(invalid("`sessions` must be an array")),
    };

    let sessions: Vec<Session> = serde_json::from_value(sessions)
        .map_err(|e| invalid(format!("malformed session data: {}", e)))?;

    check_unique_ids(&sessions)?;
    for session in &sessions {
        check_session(session)
            .map_err(|e| invalid(format!("session {}: {:#}", session.id, e)))?;
    }

    let requested = object.get("activeSessionId").and_then(Value::as_str);
    let active_session_id = match requested {
        Some(id) if sessions.iter().any(|s| s.id == id) => Some(id.to_string()),
        _ => {
            if requested.is_some() {
                tracing::warn!("Backup names an unknown active session, using the last one");
            }
            sessions.last().map(|s| s.id.clone())
        }
    };

    Ok(JournalState {
        sessions,
        active_session_id,
    })
}

/// Read and parse a backup file
pub fn read_backup(path: &Path) -> Result<JournalState> {
    let contents = std::fs::read_to_string(path)?;
    let state = parse_backup(&contents)?;
    tracing::debug!(
        path = %path.display(),
        sessions = state.sessions.len(),
        trades = state.trade_count(),
        "Parsed journal backup"
    );
    Ok(state)
}

/// Session and trade ids share one namespace
fn check_unique_ids(sessions: &[Session]) -> Result<()> {
    let mut seen = HashSet::new();
    for session in sessions {
        if !seen.insert(session.id.as_str()) {
            return Err(invalid(format!("duplicate session id {}", session.id)));
        }
        for trade in &session.trades {
            if !seen.insert(trade.id.as_str()) {
                return Err(invalid(format!("duplicate trade id {}", trade.id)));
            }
        }
    }
    Ok(())
}
