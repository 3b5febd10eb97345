use super::{open_storage, short_id};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Print where the journal lives and a one-line summary of its contents
pub fn show_status(config: &Config) -> Result<()> {
    let storage = open_storage(config)?;
    let journal = storage.load_state()?;

    println!("Database: {}", storage.path().display().to_string().cyan());
    match storage.record()? {
        Some(record) => println!(
            "Last saved: {} ({} bytes)",
            record.updated_at.format("%Y-%m-%d %H:%M UTC"),
            record.size_bytes
        ),
        None => println!("{}", "Nothing saved yet.".yellow()),
    }

    println!(
        "Sessions: {}  Trades: {}",
        journal.sessions.len(),
        journal.trade_count()
    );
    match journal.active_session() {
        Some(session) => println!(
            "Active session: {} {}",
            session.name.bold(),
            short_id(&session.id).cyan()
        ),
        None => println!("Active session: {}", "none".dimmed()),
    }
    Ok(())
}
