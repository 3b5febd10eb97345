use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tradelog::journal::JournalState;
use tradelog::storage::SqliteStorage;

/// A scratch directory holding the journal database and any backup files
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create tempdir"),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("journal.db")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `tradelog` command bound to this workspace's database, with a config
    /// path that does not exist so defaults apply
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tradelog").unwrap();
        cmd.env_remove("TRADELOG_DB")
            .env_remove("TRADELOG_DATE_FORMAT")
            .env_remove("TRADELOG_CURRENCY")
            .env_remove("TRADELOG_JSON_LOGS")
            .env_remove("RUST_LOG")
            .env("TRADELOG_BACKUP_DIR", self.dir.path())
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(self.path("missing-config.yaml"))
            .arg("--db")
            .arg(self.db_path());
        cmd
    }

    /// Read the journal the CLI has written
    pub fn journal(&self) -> JournalState {
        SqliteStorage::new_with_path(self.db_path())
            .expect("open storage")
            .load_state()
            .expect("load state")
    }

    /// Store a journal directly, bypassing the CLI
    pub fn seed(&self, journal: &JournalState) {
        SqliteStorage::new_with_path(self.db_path())
            .expect("open storage")
            .save_state(journal)
            .expect("save state");
    }
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("failed to write file");
}
