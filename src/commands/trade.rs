use super::{colored_pnl, format_number, open_storage, short_id, truncate};
use crate::cli::{TradeAddArgs, TradeCommand, TradeReflectArgs, TradeUpdateArgs};
use crate::config::{Config, DisplayConfig};
use crate::error::Result;
use crate::journal::{Direction, NewTrade, Reflection, Session, Trade, TradeUpdate};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle trade commands
pub fn handle_trade(config: &Config, command: TradeCommand) -> Result<()> {
    let storage = open_storage(config)?;
    let mut journal = storage.load_state()?;
    let display = &config.display;

    match command {
        TradeCommand::Add(args) => {
            let session = args.session.clone();
            let id = journal.add_trade(session.as_deref(), new_trade(args))?;
            storage.save_state(&journal)?;
            tracing::info!(trade_id = %id, "Trade logged");

            let (session, trade) = journal.find_trade(&id)?;
            println!(
                "{} {} {} in {} {}",
                "Logged".green(),
                trade.direction,
                trade.symbol.bold(),
                session.name,
                short_id(&trade.id).cyan()
            );
        }
        TradeCommand::Update(args) => {
            let id = args.id.clone();
            let update = trade_update(args);
            if update.is_empty() {
                println!("{}", "Nothing to update.".yellow());
                return Ok(());
            }

            let trade = journal.update_trade(&id, update)?;
            let message = format!("Updated trade {} {}", trade.symbol, short_id(&trade.id));
            storage.save_state(&journal)?;
            println!("{}", message.green());
        }
        TradeCommand::Reflect(args) => {
            let id = args.id.clone();
            let trade = journal.reflect(&id, reflection(args))?;
            let message = match trade.reflection {
                Some(_) => format!("Saved reflection on {} {}", trade.symbol, short_id(&trade.id)),
                None => format!("Cleared reflection on {} {}", trade.symbol, short_id(&trade.id)),
            };
            storage.save_state(&journal)?;
            println!("{}", message.green());
        }
        TradeCommand::Delete { id } => {
            let removed = journal.delete_trade(&id)?;
            storage.save_state(&journal)?;
            tracing::info!(trade_id = %removed.id, "Trade deleted");
            println!(
                "{}",
                format!("Deleted trade {} {}", removed.symbol, short_id(&removed.id)).green()
            );
        }
        TradeCommand::List { session } => {
            let session: &Session = match session.as_deref() {
                Some(id) => journal.session(id)?,
                None => match journal.active_session() {
                    Some(s) => s,
                    None => {
                        println!("{}", "No active session.".yellow());
                        return Ok(());
                    }
                },
            };
            if session.trades.is_empty() {
                println!("{}", format!("No trades in {}.", session.name).yellow());
                return Ok(());
            }
            println!("\nTrades in {}:", session.name.bold());
            print_trade_table(&session.trades, display);
        }
        TradeCommand::Show { id } => {
            let (session, trade) = journal.find_trade(&id)?;
            print_trade_detail(session, trade, display);
        }
    }

    Ok(())
}

fn new_trade(args: TradeAddArgs) -> NewTrade {
    let mut input = NewTrade::new(args.symbol, args.side, args.entry, args.qty)
        .with_fees(args.fees)
        .with_tags(args.tags);
    input.exit_price = args.exit;
    input.setup = args.setup;
    input.notes = args.notes;
    input
}

fn trade_update(args: TradeUpdateArgs) -> TradeUpdate {
    let exit_price = if args.clear_exit {
        Some(None)
    } else {
        args.exit.map(Some)
    };
    let tags = if args.clear_tags {
        Some(Vec::new())
    } else if args.tags.is_empty() {
        None
    } else {
        Some(args.tags)
    };

    TradeUpdate {
        symbol: args.symbol,
        direction: args.side,
        entry_price: args.entry,
        exit_price,
        quantity: args.qty,
        fees: args.fees,
        setup: args.setup.map(Some),
        tags,
        notes: args.notes.map(Some),
    }
}

fn reflection(args: TradeReflectArgs) -> Reflection {
    Reflection {
        went_well: args.went_well,
        to_improve: args.to_improve,
        lesson: args.lesson,
        rating: args.rating,
        ..Reflection::new()
    }
}

/// Print trades as a table in logging order
pub fn print_trade_table(trades: &[Trade], display: &DisplayConfig) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Symbol".bold(),
        "Side".bold(),
        "Qty".bold(),
        "Entry".bold(),
        "Exit".bold(),
        "P&L".bold(),
        "Setup".bold(),
        "Note".bold()
    ]);

    for trade in trades {
        let side = match trade.direction {
            Direction::Long => trade.direction.label().green(),
            Direction::Short => trade.direction.label().red(),
        };
        let exit = trade
            .exit_price
            .map(format_number)
            .unwrap_or_else(|| "open".to_string());
        let note = trade
            .notes
            .as_deref()
            .map(|n| truncate(n, display.max_note_width))
            .unwrap_or_default();
        let reflected = if trade.reflection.is_some() { "*" } else { "" };

        table.add_row(prettytable::row![
            format!("{}{}", short_id(&trade.id), reflected).cyan(),
            trade.symbol,
            side,
            format_number(trade.quantity),
            format_number(trade.entry_price),
            exit,
            colored_pnl(trade.pnl(), display),
            trade.setup.as_deref().unwrap_or("-"),
            note
        ]);
    }

    table.printstd();
    println!("{}", "* has a reflection".dimmed());
}

fn print_trade_detail(session: &Session, trade: &Trade, display: &DisplayConfig) {
    println!(
        "\n{} {} {}",
        trade.direction,
        trade.symbol.bold(),
        short_id(&trade.id).cyan()
    );
    println!(
        "Session:  {} ({})",
        session.name,
        session.date.format(&display.date_format)
    );
    println!("Logged:   {}", trade.logged_at.format("%Y-%m-%d %H:%M UTC"));
    println!("Quantity: {}", format_number(trade.quantity));
    println!("Entry:    {}", format_number(trade.entry_price));
    match trade.exit_price {
        Some(exit) => println!("Exit:     {}", format_number(exit)),
        None => println!("Exit:     {}", "open".yellow()),
    }
    println!("Fees:     {}", format_number(trade.fees));
    println!(
        "P&L:      {} ({})",
        colored_pnl(trade.pnl(), display),
        trade.outcome().label()
    );
    if let Some(setup) = &trade.setup {
        println!("Setup:    {}", setup);
    }
    if !trade.tags.is_empty() {
        println!("Tags:     {}", trade.tags.join(", "));
    }
    if let Some(notes) = &trade.notes {
        println!("Notes:    {}", notes);
    }

    match &trade.reflection {
        Some(r) => {
            println!("\n{}", "Reflection".bold());
            if let Some(text) = &r.went_well {
                println!("  Went well:  {}", text);
            }
            if let Some(text) = &r.to_improve {
                println!("  To improve: {}", text);
            }
            if let Some(text) = &r.lesson {
                println!("  Lesson:     {}", text);
            }
            if let Some(rating) = r.rating {
                println!("  Rating:     {}/5", rating);
            }
        }
        None => println!("\n{}", "No reflection yet.".dimmed()),
    }
    println!();
}
