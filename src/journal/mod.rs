//! Journal state container and its mutations
//!
//! The whole application state is a single [`JournalState`]: the list of
//! sessions plus the id of the active one. Every operation here validates
//! its input before touching the state, so a failed call leaves the journal
//! exactly as it was.
//!
//! Identifiers accepted by the operations may be the full UUID or a unique
//! prefix of at least [`MIN_ID_PREFIX`] characters.

use crate::error::{JournalError, Result};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

pub mod types;
pub use types::{
    Direction, JournalState, NewTrade, Outcome, Reflection, Session, SessionSummary, Trade,
    TradeUpdate,
};

/// Shortest identifier prefix accepted for lookups
pub const MIN_ID_PREFIX: usize = 4;

const MAX_NAME_LEN: usize = 100;

fn symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z0-9][A-Z0-9./:_-]{0,31}$").expect("symbol pattern is a valid regex")
    })
}

enum Lookup {
    Found(usize),
    Missing,
    Ambiguous(usize),
}

/// Match `query` against `ids`: an exact id wins, otherwise a unique prefix
fn lookup<'a>(ids: impl Iterator<Item = &'a str> + Clone, query: &str) -> Lookup {
    let query = query.trim();
    if let Some(pos) = ids.clone().position(|id| id == query) {
        return Lookup::Found(pos);
    }
    if query.len() < MIN_ID_PREFIX {
        return Lookup::Missing;
    }

    let matches: Vec<usize> = ids
        .enumerate()
        .filter(|(_, id)| id.starts_with(query))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Lookup::Missing,
        [only] => Lookup::Found(*only),
        many => Lookup::Ambiguous(many.len()),
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trim free text, mapping blank input to `None`
fn clean_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !cleaned.contains(&tag) {
            cleaned.push(tag);
        }
    }
    cleaned
}

fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();
    if !symbol_pattern().is_match(&symbol) {
        return Err(JournalError::Validation(format!(
            "invalid symbol '{}': use letters, digits and . / : _ - (max 32 chars)",
            symbol
        ))
        .into());
    }
    Ok(symbol)
}

fn check_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(JournalError::Validation("session name must not be empty".into()).into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(JournalError::Validation(format!(
            "session name is longer than {} characters",
            MAX_NAME_LEN
        ))
        .into());
    }
    Ok(())
}

fn check_price(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(
            JournalError::Validation(format!("{} must be a positive number", label)).into(),
        );
    }
    Ok(())
}

fn check_trade(trade: &Trade) -> Result<()> {
    check_price("entry price", trade.entry_price)?;
    if let Some(exit) = trade.exit_price {
        check_price("exit price", exit)?;
    }
    check_price("quantity", trade.quantity)?;
    if !trade.fees.is_finite() || trade.fees < 0.0 {
        return Err(JournalError::Validation("fees must be zero or positive".into()).into());
    }
    Ok(())
}

fn check_reflection(reflection: &Reflection) -> Result<()> {
    if let Some(rating) = reflection.rating {
        if !(1..=5).contains(&rating) {
            return Err(JournalError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                rating
            ))
            .into());
        }
    }
    Ok(())
}

/// Check a session that did not come through the journal operations
///
/// Applies the same rules as `create_session`, `add_trade` and `reflect`;
/// symbols must already be in normalized form.
pub(crate) fn check_session(session: &Session) -> Result<()> {
    check_name(&session.name)?;
    for trade in &session.trades {
        check_stored_trade(trade).with_context(|| format!("trade {}", trade.id))?;
    }
    Ok(())
}

fn check_stored_trade(trade: &Trade) -> Result<()> {
    if !symbol_pattern().is_match(&trade.symbol) {
        return Err(
            JournalError::Validation(format!("invalid symbol '{}'", trade.symbol)).into(),
        );
    }
    check_trade(trade)?;
    if let Some(reflection) = &trade.reflection {
        check_reflection(reflection)?;
    }
    Ok(())
}

impl JournalState {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// The session new trades go to by default
    pub fn active_session(&self) -> Option<&Session> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Find a session by full id or unique prefix
    pub fn session(&self, id: &str) -> Result<&Session> {
        let idx = self.session_index(id)?;
        Ok(&self.sessions[idx])
    }

    /// Find a trade by full id or unique prefix, together with its session
    pub fn find_trade(&self, id: &str) -> Result<(&Session, &Trade)> {
        let (s, t) = self.trade_index(id)?;
        let session = &self.sessions[s];
        Ok((session, &session.trades[t]))
    }

    /// Total number of trades across all sessions
    pub fn trade_count(&self) -> usize {
        self.sessions.iter().map(|s| s.trades.len()).sum()
    }

    fn session_index(&self, id: &str) -> Result<usize> {
        match lookup(self.sessions.iter().map(|s| s.id.as_str()), id) {
            Lookup::Found(idx) => Ok(idx),
            Lookup::Missing => Err(JournalError::SessionNotFound(id.to_string()).into()),
            Lookup::Ambiguous(matches) => Err(JournalError::AmbiguousId {
                prefix: id.to_string(),
                matches,
            }
            .into()),
        }
    }

    fn trade_index(&self, id: &str) -> Result<(usize, usize)> {
        let locations: Vec<(usize, usize)> = self
            .sessions
            .iter()
            .enumerate()
            .flat_map(|(s, session)| (0..session.trades.len()).map(move |t| (s, t)))
            .collect();
        let ids = locations
            .iter()
            .map(|&(s, t)| self.sessions[s].trades[t].id.as_str());

        match lookup(ids, id) {
            Lookup::Found(pos) => Ok(locations[pos]),
            Lookup::Missing => Err(JournalError::TradeNotFound(id.to_string()).into()),
            Lookup::Ambiguous(matches) => Err(JournalError::AmbiguousId {
                prefix: id.to_string(),
                matches,
            }
            .into()),
        }
    }

    /// Create a session and make it the active one
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, must not be blank
    /// * `date` - Trading day; `None` uses today's local date
    /// * `notes` - Optional free-form session notes
    ///
    /// # Returns
    ///
    /// Returns the id of the new session
    ///
    /// # Examples
    ///
    /// ```
    /// use tradelog::journal::JournalState;
    ///
    /// let mut journal = JournalState::new();
    /// let id = journal.create_session("Monday open", None, None).unwrap();
    /// assert_eq!(journal.active_session_id.as_deref(), Some(id.as_str()));
    /// ```
    pub fn create_session(
        &mut self,
        name: &str,
        date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<String> {
        let name = name.trim();
        check_name(name)?;

        let session = Session {
            id: new_id(),
            name: name.to_string(),
            date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            created_at: Utc::now(),
            notes: clean_text(notes),
            trades: Vec::new(),
        };
        let id = session.id.clone();

        tracing::debug!(session_id = %id, name = %session.name, "Created session");
        self.sessions.push(session);
        self.active_session_id = Some(id.clone());
        Ok(id)
    }

    /// Make an existing session the active one
    pub fn select_session(&mut self, id: &str) -> Result<&Session> {
        let idx = self.session_index(id)?;
        self.active_session_id = Some(self.sessions[idx].id.clone());
        Ok(&self.sessions[idx])
    }

    /// Remove a session together with all of its trades
    ///
    /// When the removed session was active, the most recently created
    /// remaining session becomes active (or none when the journal is empty).
    pub fn delete_session(&mut self, id: &str) -> Result<Session> {
        let idx = self.session_index(id)?;
        let removed = self.sessions.remove(idx);

        if self.active_session_id.as_deref() == Some(removed.id.as_str()) {
            self.active_session_id = self.sessions.last().map(|s| s.id.clone());
        }

        tracing::debug!(
            session_id = %removed.id,
            trades = removed.trades.len(),
            "Deleted session"
        );
        Ok(removed)
    }

    /// Log a trade in the given session, or the active session when `None`
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` when no target exists, or a validation error
    /// when the symbol, prices, quantity or fees are invalid.
    pub fn add_trade(&mut self, session_id: Option<&str>, input: NewTrade) -> Result<String> {
        let idx = match session_id {
            Some(id) => self.session_index(id)?,
            None => {
                let active = self
                    .active_session_id
                    .as_deref()
                    .ok_or(JournalError::NoActiveSession)?;
                self.sessions
                    .iter()
                    .position(|s| s.id == active)
                    .ok_or(JournalError::NoActiveSession)?
            }
        };

        let trade = Trade {
            id: new_id(),
            symbol: normalize_symbol(&input.symbol)?,
            direction: input.direction,
            entry_price: input.entry_price,
            exit_price: input.exit_price,
            quantity: input.quantity,
            fees: input.fees,
            setup: clean_text(input.setup),
            tags: clean_tags(input.tags),
            notes: clean_text(input.notes),
            reflection: None,
            logged_at: Utc::now(),
        };
        check_trade(&trade)?;

        let id = trade.id.clone();
        tracing::debug!(trade_id = %id, symbol = %trade.symbol, "Added trade");
        self.sessions[idx].trades.push(trade);
        Ok(id)
    }

    /// Apply a patch to an existing trade
    ///
    /// The patched trade is validated as a whole before it replaces the
    /// original.
    pub fn update_trade(&mut self, trade_id: &str, update: TradeUpdate) -> Result<&Trade> {
        let (s, t) = self.trade_index(trade_id)?;
        let mut patched = self.sessions[s].trades[t].clone();

        if let Some(symbol) = update.symbol {
            patched.symbol = normalize_symbol(&symbol)?;
        }
        if let Some(direction) = update.direction {
            patched.direction = direction;
        }
        if let Some(entry) = update.entry_price {
            patched.entry_price = entry;
        }
        if let Some(exit) = update.exit_price {
            patched.exit_price = exit;
        }
        if let Some(quantity) = update.quantity {
            patched.quantity = quantity;
        }
        if let Some(fees) = update.fees {
            patched.fees = fees;
        }
        if let Some(setup) = update.setup {
            patched.setup = clean_text(setup);
        }
        if let Some(tags) = update.tags {
            patched.tags = clean_tags(tags);
        }
        if let Some(notes) = update.notes {
            patched.notes = clean_text(notes);
        }
        check_trade(&patched)?;

        tracing::debug!(trade_id = %patched.id, "Updated trade");
        self.sessions[s].trades[t] = patched;
        Ok(&self.sessions[s].trades[t])
    }

    /// Set or replace the reflection attached to a trade
    pub fn reflect(&mut self, trade_id: &str, reflection: Reflection) -> Result<&Trade> {
        check_reflection(&reflection)?;
        let (s, t) = self.trade_index(trade_id)?;

        let reflection = Reflection {
            went_well: clean_text(reflection.went_well),
            to_improve: clean_text(reflection.to_improve),
            lesson: clean_text(reflection.lesson),
            rating: reflection.rating,
            updated_at: Utc::now(),
        };

        let trade = &mut self.sessions[s].trades[t];
        trade.reflection = if reflection.is_empty() {
            None
        } else {
            Some(reflection)
        };
        Ok(trade)
    }

    /// Remove a trade from whichever session holds it
    pub fn delete_trade(&mut self, trade_id: &str) -> Result<Trade> {
        let (s, t) = self.trade_index(trade_id)?;
        let removed = self.sessions[s].trades.remove(t);
        tracing::debug!(trade_id = %removed.id, "Deleted trade");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error_contains;

    fn journal_with_session() -> (JournalState, String) {
        let mut journal = JournalState::new();
        let id = journal
            .create_session("Monday", NaiveDate::from_ymd_opt(2024, 3, 4), None)
            .unwrap();
        (journal, id)
    }

    fn es_long() -> NewTrade {
        NewTrade::new("es", Direction::Long, 5000.0, 2.0)
    }

    #[test]
    fn test_create_session_becomes_active() {
        let mut journal = JournalState::new();
        let first = journal.create_session("First", None, None).unwrap();
        let second = journal.create_session("Second", None, None).unwrap();

        assert_eq!(journal.sessions.len(), 2);
        assert_ne!(first, second);
        assert_eq!(journal.active_session_id.as_deref(), Some(second.as_str()));
        assert_eq!(journal.active_session().unwrap().name, "Second");
    }

    #[test]
    fn test_create_session_trims_and_rejects_blank_name() {
        let mut journal = JournalState::new();
        assert_error_contains(journal.create_session("   ", None, None), "must not be empty");
        assert!(journal.sessions.is_empty());

        let id = journal
            .create_session("  Tuesday  ", None, Some("  ".into()))
            .unwrap();
        let session = journal.session(&id).unwrap();
        assert_eq!(session.name, "Tuesday");
        assert!(session.notes.is_none());
    }

    #[test]
    fn test_create_session_rejects_long_name() {
        let mut journal = JournalState::new();
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert_error_contains(journal.create_session(&name, None, None), "longer than");
    }

    #[test]
    fn test_create_session_uses_given_date() {
        let (journal, id) = journal_with_session();
        assert_eq!(
            journal.session(&id).unwrap().date,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }

    #[test]
    fn test_select_session_by_prefix() {
        let (mut journal, first) = journal_with_session();
        journal.create_session("Other", None, None).unwrap();

        let selected = journal.select_session(&first[..8]).unwrap();
        assert_eq!(selected.id, first);
        assert_eq!(journal.active_session_id.as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_select_unknown_session_keeps_active() {
        let (mut journal, id) = journal_with_session();
        assert_error_contains(journal.select_session("nope-nope"), "Session not found");
        assert_eq!(journal.active_session_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_short_prefix_is_not_matched() {
        let (journal, id) = journal_with_session();
        assert!(journal.session(&id[..MIN_ID_PREFIX - 1]).is_err());
        assert!(journal.session(&id[..MIN_ID_PREFIX]).is_ok());
    }

    #[test]
    fn test_ambiguous_prefix_is_rejected() {
        let mut journal = JournalState::new();
        for name in ["a", "b"] {
            journal.create_session(name, None, None).unwrap();
        }
        journal.sessions[0].id = "abcd-1111".to_string();
        journal.sessions[1].id = "abcd-2222".to_string();

        assert_error_contains(journal.session("abcd"), "matches 2 records");
        assert_eq!(journal.session("abcd-2").unwrap().name, "b");
    }

    #[test]
    fn test_delete_active_session_falls_back_to_last() {
        let mut journal = JournalState::new();
        let a = journal.create_session("A", None, None).unwrap();
        let b = journal.create_session("B", None, None).unwrap();
        let c = journal.create_session("C", None, None).unwrap();

        journal.delete_session(&c).unwrap();
        assert_eq!(journal.active_session_id.as_deref(), Some(b.as_str()));

        journal.select_session(&a).unwrap();
        journal.delete_session(&b).unwrap();
        assert_eq!(journal.active_session_id.as_deref(), Some(a.as_str()));

        journal.delete_session(&a).unwrap();
        assert!(journal.active_session_id.is_none());
        assert!(journal.sessions.is_empty());
    }

    #[test]
    fn test_delete_inactive_session_keeps_active() {
        let mut journal = JournalState::new();
        let a = journal.create_session("A", None, None).unwrap();
        let b = journal.create_session("B", None, None).unwrap();

        let removed = journal.delete_session(&a).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(journal.active_session_id.as_deref(), Some(b.as_str()));
    }

    #[test]
    fn test_add_trade_to_active_session() {
        let (mut journal, session_id) = journal_with_session();
        let trade_id = journal
            .add_trade(None, es_long().with_tags(vec![" Breakout ".into(), "breakout".into()]))
            .unwrap();

        let (session, trade) = journal.find_trade(&trade_id).unwrap();
        assert_eq!(session.id, session_id);
        assert_eq!(trade.symbol, "ES");
        assert_eq!(trade.tags, vec!["breakout".to_string()]);
        assert!(trade.is_open());
    }

    #[test]
    fn test_add_trade_to_explicit_session() {
        let (mut journal, first) = journal_with_session();
        journal.create_session("Second", None, None).unwrap();

        journal.add_trade(Some(&first), es_long()).unwrap();
        assert_eq!(journal.session(&first).unwrap().trades.len(), 1);
        assert!(journal.active_session().unwrap().trades.is_empty());
    }

    #[test]
    fn test_add_trade_without_session_fails() {
        let mut journal = JournalState::new();
        assert_error_contains(journal.add_trade(None, es_long()), "No active session");
    }

    #[test]
    fn test_add_trade_validates_input() {
        let (mut journal, _) = journal_with_session();

        let bad_symbol = NewTrade::new("no spaces", Direction::Long, 1.0, 1.0);
        assert_error_contains(journal.add_trade(None, bad_symbol), "invalid symbol");

        let bad_entry = NewTrade::new("AAPL", Direction::Long, 0.0, 1.0);
        assert_error_contains(journal.add_trade(None, bad_entry), "entry price");

        let bad_exit = NewTrade::new("AAPL", Direction::Long, 1.0, 1.0).with_exit(f64::NAN);
        assert_error_contains(journal.add_trade(None, bad_exit), "exit price");

        let bad_qty = NewTrade::new("AAPL", Direction::Short, 1.0, -3.0);
        assert_error_contains(journal.add_trade(None, bad_qty), "quantity");

        let bad_fees = NewTrade::new("AAPL", Direction::Short, 1.0, 1.0).with_fees(-1.0);
        assert_error_contains(journal.add_trade(None, bad_fees), "fees");

        assert_eq!(journal.trade_count(), 0);
    }

    #[test]
    fn test_update_trade_applies_patch() {
        let (mut journal, _) = journal_with_session();
        let id = journal
            .add_trade(None, es_long().with_setup("ORB").with_notes("first"))
            .unwrap();

        let update = TradeUpdate {
            exit_price: Some(Some(5010.0)),
            fees: Some(4.5),
            setup: Some(None),
            ..Default::default()
        };
        let trade = journal.update_trade(&id, update).unwrap();

        assert_eq!(trade.exit_price, Some(5010.0));
        assert_eq!(trade.fees, 4.5);
        assert!(trade.setup.is_none());
        assert_eq!(trade.notes.as_deref(), Some("first"));
    }

    #[test]
    fn test_update_trade_can_reopen() {
        let (mut journal, _) = journal_with_session();
        let id = journal.add_trade(None, es_long().with_exit(5001.0)).unwrap();

        let update = TradeUpdate {
            exit_price: Some(None),
            ..Default::default()
        };
        assert!(journal.update_trade(&id, update).unwrap().is_open());
    }

    #[test]
    fn test_failed_update_leaves_trade_unchanged() {
        let (mut journal, _) = journal_with_session();
        let id = journal.add_trade(None, es_long()).unwrap();
        let before = journal.find_trade(&id).unwrap().1.clone();

        let update = TradeUpdate {
            symbol: Some("MES".into()),
            quantity: Some(0.0),
            ..Default::default()
        };
        assert_error_contains(journal.update_trade(&id, update), "quantity");
        assert_eq!(journal.find_trade(&id).unwrap().1, &before);
    }

    #[test]
    fn test_update_unknown_trade() {
        let (mut journal, _) = journal_with_session();
        assert_error_contains(
            journal.update_trade("deadbeef", TradeUpdate::default()),
            "Trade not found",
        );
    }

    #[test]
    fn test_reflect_sets_and_clears_reflection() {
        let (mut journal, _) = journal_with_session();
        let id = journal.add_trade(None, es_long()).unwrap();

        let reflection = Reflection::new()
            .with_went_well("waited for confirmation")
            .with_lesson("size down on news days")
            .with_rating(4);
        let trade = journal.reflect(&id, reflection).unwrap();
        let stored = trade.reflection.as_ref().unwrap();
        assert_eq!(stored.rating, Some(4));
        assert_eq!(stored.lesson.as_deref(), Some("size down on news days"));

        let trade = journal.reflect(&id, Reflection::new()).unwrap();
        assert!(trade.reflection.is_none());
    }

    #[test]
    fn test_reflect_rejects_rating_out_of_range() {
        let (mut journal, _) = journal_with_session();
        let id = journal.add_trade(None, es_long()).unwrap();

        assert_error_contains(
            journal.reflect(&id, Reflection::new().with_rating(6)),
            "between 1 and 5",
        );
        assert_error_contains(
            journal.reflect(&id, Reflection::new().with_rating(0)),
            "between 1 and 5",
        );
        assert!(journal.find_trade(&id).unwrap().1.reflection.is_none());
    }

    #[test]
    fn test_delete_trade() {
        let (mut journal, _) = journal_with_session();
        let keep = journal.add_trade(None, es_long()).unwrap();
        let drop = journal.add_trade(None, es_long()).unwrap();

        let removed = journal.delete_trade(&drop).unwrap();
        assert_eq!(removed.id, drop);
        assert_eq!(journal.trade_count(), 1);
        assert!(journal.find_trade(&keep).is_ok());
        assert_error_contains(journal.delete_trade(&drop), "Trade not found");
    }

    #[test]
    fn test_find_trade_across_sessions() {
        let (mut journal, first) = journal_with_session();
        let second = journal.create_session("Second", None, None).unwrap();
        let t1 = journal.add_trade(Some(&first), es_long()).unwrap();
        let t2 = journal.add_trade(Some(&second), es_long()).unwrap();

        assert_eq!(journal.find_trade(&t1).unwrap().0.id, first);
        assert_eq!(journal.find_trade(&t2).unwrap().0.id, second);
    }

    #[test]
    fn test_trade_pnl_and_outcome() {
        let (mut journal, _) = journal_with_session();
        let long_win = journal
            .add_trade(None, es_long().with_exit(5010.0).with_fees(2.0))
            .unwrap();
        let short_loss = journal
            .add_trade(
                None,
                NewTrade::new("NQ", Direction::Short, 100.0, 3.0).with_exit(101.0),
            )
            .unwrap();
        let flat = journal
            .add_trade(
                None,
                NewTrade::new("CL", Direction::Short, 80.0, 1.0)
                    .with_exit(79.0)
                    .with_fees(1.0),
            )
            .unwrap();

        let trade = journal.find_trade(&long_win).unwrap().1;
        assert_eq!(trade.pnl(), Some(18.0));
        assert_eq!(trade.outcome(), Outcome::Win);

        let trade = journal.find_trade(&short_loss).unwrap().1;
        assert_eq!(trade.pnl(), Some(-3.0));
        assert_eq!(trade.outcome(), Outcome::Loss);

        let trade = journal.find_trade(&flat).unwrap().1;
        assert_eq!(trade.outcome(), Outcome::Breakeven);
    }

    #[test]
    fn test_float_noise_counts_as_breakeven() {
        let (mut journal, id) = journal_with_session();
        let noisy = journal
            .add_trade(
                None,
                NewTrade::new("BTC", Direction::Long, 0.1, 1.0)
                    .with_exit(0.3)
                    .with_fees(0.2),
            )
            .unwrap();

        let trade = journal.find_trade(&noisy).unwrap().1;
        assert_ne!(trade.pnl(), Some(0.0));
        assert_eq!(trade.outcome(), Outcome::Breakeven);

        let summary = journal.session(&id).unwrap().summary();
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.closed, 1);

        assert_eq!(Outcome::from_pnl(0.01), Outcome::Win);
        assert_eq!(Outcome::from_pnl(-0.01), Outcome::Loss);
    }

    #[test]
    fn test_session_summary() {
        let (mut journal, id) = journal_with_session();
        journal.add_trade(None, es_long().with_exit(5010.0)).unwrap();
        journal.add_trade(None, es_long().with_exit(4995.0)).unwrap();
        journal.add_trade(None, es_long().with_exit(5005.0)).unwrap();
        journal.add_trade(None, es_long()).unwrap();

        let summary = journal.session(&id).unwrap().summary();
        assert_eq!(summary.trade_count, 4);
        assert_eq!(summary.open, 1);
        assert_eq!(summary.closed, 3);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.total_pnl, 20.0);
        assert_eq!(summary.best, Some(20.0));
        assert_eq!(summary.worst, Some(-10.0));
        let rate = summary.win_rate().unwrap();
        assert!((rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_has_no_win_rate() {
        let (journal, id) = journal_with_session();
        let summary = journal.session(&id).unwrap().summary();
        assert_eq!(summary, SessionSummary::default());
        assert!(summary.win_rate().is_none());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("LONG".parse::<Direction>().unwrap(), Direction::Long);
        assert_eq!("sell".parse::<Direction>().unwrap(), Direction::Short);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_state_serializes_with_camel_case_keys() {
        let (mut journal, _) = journal_with_session();
        journal.add_trade(None, es_long()).unwrap();

        let value = serde_json::to_value(&journal).unwrap();
        assert!(value["sessions"].is_array());
        assert!(value["activeSessionId"].is_string());
        let trade = &value["sessions"][0]["trades"][0];
        assert_eq!(trade["entryPrice"], 5000.0);
        assert_eq!(trade["direction"], "long");
        assert!(trade.get("exitPrice").is_none());
    }
}
