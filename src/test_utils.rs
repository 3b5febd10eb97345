//! Test utilities for tradelog
//!
//! Temporary directories, test files, journal fixtures and assertion helpers.

use crate::error::Result;
use crate::journal::{Direction, JournalState, NewTrade, Reflection};
use crate::storage::SqliteStorage;
use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Create storage backed by a database inside a fresh temporary directory
///
/// The TempDir is returned so the caller keeps the directory alive.
pub fn temp_storage() -> (SqliteStorage, TempDir) {
    let dir = temp_dir();
    let storage =
        SqliteStorage::new_with_path(dir.path().join("journal.db")).expect("create storage");
    (storage, dir)
}

/// A journal with two sessions; the first is active and holds one closed
/// and one open trade, the closed trade carrying a reflection
pub fn sample_journal() -> JournalState {
    let mut journal = JournalState::new();
    let monday = journal
        .create_session("Monday", NaiveDate::from_ymd_opt(2024, 3, 4), None)
        .expect("create session");
    let closed = journal
        .add_trade(
            None,
            NewTrade::new("ES", Direction::Long, 5000.0, 2.0)
                .with_exit(5012.5)
                .with_fees(4.0),
        )
        .expect("add closed trade");
    journal
        .add_trade(None, NewTrade::new("NQ", Direction::Short, 18000.0, 1.0))
        .expect("add open trade");
    journal
        .reflect(&closed, Reflection::new().with_went_well("followed plan"))
        .expect("reflect");
    journal
        .create_session("Tuesday", NaiveDate::from_ymd_opt(2024, 3, 5), None)
        .expect("create session");
    journal.select_session(&monday).expect("select");
    journal
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_sample_journal_shape() {
        let journal = sample_journal();
        assert_eq!(journal.sessions.len(), 2);
        assert_eq!(journal.active_session().unwrap().name, "Monday");
        assert_eq!(journal.trade_count(), 2);
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(JournalError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<()> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<()> = Err(JournalError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }
}
