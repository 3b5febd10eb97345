use super::{confirm, open_storage};
use crate::backup::{default_file_name, export_json, read_backup, write_backup};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Export the journal to a backup file, or to stdout when `output` is `-`
pub fn run_export(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let storage = open_storage(config)?;
    let journal = storage.load_state()?;

    if output.as_deref() == Some(Path::new("-")) {
        println!("{}", export_json(&journal, config.backup.pretty)?);
        return Ok(());
    }

    let path = match output {
        Some(path) => path,
        None => {
            let dir = &config.backup.default_dir;
            std::fs::create_dir_all(dir)?;
            dir.join(default_file_name(chrono::Local::now().date_naive()))
        }
    };

    write_backup(&journal, &path, config.backup.pretty)?;
    println!(
        "{} {} session(s), {} trade(s) to {}",
        "Exported".green(),
        journal.sessions.len(),
        journal.trade_count(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Replace the journal with the contents of a backup file
///
/// The current journal is only overwritten after confirmation, unless
/// `yes` is set. An invalid file never touches stored data.
pub fn run_import(config: &Config, path: &Path, yes: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let imported = read_backup(path)?;
    let current = storage.load_state()?;

    println!(
        "Backup contains {} session(s) and {} trade(s).",
        imported.sessions.len(),
        imported.trade_count()
    );

    if !yes {
        let question = format!(
            "Replace the current journal ({} session(s), {} trade(s))?",
            current.sessions.len(),
            current.trade_count()
        );
        if !confirm(&question)? {
            println!("{}", "Import cancelled.".yellow());
            return Ok(());
        }
    }

    storage.save_state(&imported)?;
    tracing::info!(
        path = %path.display(),
        sessions = imported.sessions.len(),
        "Imported journal backup"
    );
    println!("{}", "Journal restored from backup.".green());
    Ok(())
}
