use super::{colored_pnl, confirm, open_storage, short_id, truncate};
use crate::cli::SessionCommand;
use crate::config::{Config, DisplayConfig};
use crate::error::Result;
use crate::journal::{JournalState, Session};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle session commands
pub fn handle_session(config: &Config, command: SessionCommand) -> Result<()> {
    let storage = open_storage(config)?;
    let mut journal = storage.load_state()?;
    let display = &config.display;

    match command {
        SessionCommand::New { name, date, notes } => {
            let id = journal.create_session(&name, date, notes)?;
            storage.save_state(&journal)?;
            tracing::info!(session_id = %id, "Session created");

            let session = journal.session(&id)?;
            println!(
                "{} {} ({}) {}",
                "Created session".green(),
                session.name.bold(),
                session.date.format(&display.date_format),
                short_id(&session.id).cyan()
            );
            println!("It is now the active session.");
        }
        SessionCommand::List => {
            print_session_list(&journal, display);
        }
        SessionCommand::Select { id } => {
            let session = journal.select_session(&id)?;
            let message = format!("Active session: {} {}", session.name, short_id(&session.id));
            storage.save_state(&journal)?;
            println!("{}", message.green());
        }
        SessionCommand::Show { id } => {
            let session = match id.as_deref() {
                Some(id) => journal.session(id)?,
                None => match journal.active_session() {
                    Some(session) => session,
                    None => {
                        println!("{}", "No active session.".yellow());
                        return Ok(());
                    }
                },
            };
            print_session_detail(session, display);
        }
        SessionCommand::Delete { id, yes } => {
            let session = journal.session(&id)?;
            let question = format!(
                "Delete session '{}' and its {} trade(s)?",
                session.name,
                session.trades.len()
            );
            if !yes && !confirm(&question)? {
                println!("{}", "Cancelled.".yellow());
                return Ok(());
            }

            let removed = journal.delete_session(&id)?;
            storage.save_state(&journal)?;
            tracing::info!(session_id = %removed.id, "Session deleted");
            println!("{}", format!("Deleted session {}", removed.name).green());
            if let Some(active) = journal.active_session() {
                println!("Active session: {} {}", active.name, short_id(&active.id).cyan());
            }
        }
    }

    Ok(())
}

fn print_session_list(journal: &JournalState, display: &DisplayConfig) {
    if journal.sessions.is_empty() {
        println!("{}", "No sessions yet.".yellow());
        println!(
            "Use {} to start one.",
            "tradelog session new <NAME>".cyan()
        );
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "",
        "ID".bold(),
        "Name".bold(),
        "Date".bold(),
        "Trades".bold(),
        "P&L".bold()
    ]);

    let active = journal.active_session_id.as_deref();
    for session in &journal.sessions {
        let marker = if Some(session.id.as_str()) == active {
            "*".green()
        } else {
            "".normal()
        };
        table.add_row(prettytable::row![
            marker,
            short_id(&session.id).cyan(),
            truncate(&session.name, display.max_note_width),
            session.date.format(&display.date_format).to_string(),
            session.trades.len(),
            colored_pnl(Some(session.total_pnl()), display)
        ]);
    }

    println!("\nSessions:");
    table.printstd();
    println!();
}

/// Print a session header, its trades and summary statistics
pub fn print_session_detail(session: &Session, display: &DisplayConfig) {
    println!(
        "\n{} {} ({})",
        session.name.bold(),
        short_id(&session.id).cyan(),
        session.date.format(&display.date_format)
    );
    if let Some(notes) = &session.notes {
        println!("{}", notes.dimmed());
    }

    if session.trades.is_empty() {
        println!("{}", "No trades logged in this session.".yellow());
        return;
    }

    super::trade::print_trade_table(&session.trades, display);

    let summary = session.summary();
    let win_rate = summary
        .win_rate()
        .map(|r| format!("{:.0}%", r * 100.0))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Trades: {}  Open: {}  Wins: {}  Losses: {}  Win rate: {}",
        summary.trade_count, summary.open, summary.wins, summary.losses, win_rate
    );
    println!(
        "Total P&L: {}  Best: {}  Worst: {}",
        colored_pnl(Some(summary.total_pnl), display),
        colored_pnl(summary.best, display),
        colored_pnl(summary.worst, display)
    );
    if summary.closed > 0 {
        let average = summary.total_pnl / summary.closed as f64;
        println!(
            "Average per closed trade: {}",
            colored_pnl(Some(average), display)
        );
    }
    println!();
}
