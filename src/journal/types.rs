use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Bought first, profits when price rises
    Long,
    /// Sold first, profits when price falls
    Short,
}

impl Direction {
    /// Human-readable label used in tables
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" | "l" => Ok(Direction::Long),
            "short" | "sell" | "s" => Ok(Direction::Short),
            other => Err(format!("unknown trade side '{}': use long or short", other)),
        }
    }
}

/// Result of a trade, derived from its P&L
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No exit price recorded yet
    Open,
    /// Positive P&L after fees
    Win,
    /// Negative P&L after fees
    Loss,
    /// Exactly flat after fees
    Breakeven,
}

/// Results smaller than half a cent round to zero when displayed
pub const BREAKEVEN_TOLERANCE: f64 = 0.005;

impl Outcome {
    /// Classify a realized P&L
    pub fn from_pnl(pnl: f64) -> Self {
        if pnl.abs() < BREAKEVEN_TOLERANCE {
            Outcome::Breakeven
        } else if pnl > 0.0 {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Open => "open",
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Breakeven => "flat",
        }
    }
}

/// Post-trade annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    /// What went according to plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub went_well: Option<String>,
    /// What should be done differently next time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_improve: Option<String>,
    /// The single takeaway from the trade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<String>,
    /// Self-assessed execution quality, 1 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// When the reflection was last written
    pub updated_at: DateTime<Utc>,
}

impl Reflection {
    /// Create an empty reflection stamped with the current time
    pub fn new() -> Self {
        Self {
            went_well: None,
            to_improve: None,
            lesson: None,
            rating: None,
            updated_at: Utc::now(),
        }
    }

    /// Set the "went well" note
    pub fn with_went_well(mut self, text: impl Into<String>) -> Self {
        self.went_well = Some(text.into());
        self
    }

    /// Set the "to improve" note
    pub fn with_to_improve(mut self, text: impl Into<String>) -> Self {
        self.to_improve = Some(text.into());
        self
    }

    /// Set the lesson learned
    pub fn with_lesson(mut self, text: impl Into<String>) -> Self {
        self.lesson = Some(text.into());
        self
    }

    /// Set the execution rating
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// True when no field carries any content
    pub fn is_empty(&self) -> bool {
        self.went_well.is_none()
            && self.to_improve.is_none()
            && self.lesson.is_none()
            && self.rating.is_none()
    }
}

impl Default for Reflection {
    fn default() -> Self {
        Self::new()
    }
}

/// A single logged trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    pub quantity: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<Reflection>,
    pub logged_at: DateTime<Utc>,
}

impl Trade {
    /// Realized profit or loss after fees, `None` while the trade is open
    pub fn pnl(&self) -> Option<f64> {
        let exit = self.exit_price?;
        let gross = match self.direction {
            Direction::Long => (exit - self.entry_price) * self.quantity,
            Direction::Short => (self.entry_price - exit) * self.quantity,
        };
        Some(gross - self.fees)
    }

    /// Classify the trade by its P&L
    pub fn outcome(&self) -> Outcome {
        self.pnl().map_or(Outcome::Open, Outcome::from_pnl)
    }

    /// True when no exit price has been recorded
    pub fn is_open(&self) -> bool {
        self.exit_price.is_none()
    }
}

/// Input for logging a new trade
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub quantity: f64,
    pub fees: f64,
    pub setup: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl NewTrade {
    /// Create a minimal open trade; optional fields are set with the builder methods
    pub fn new(
        symbol: impl Into<String>,
        direction: Direction,
        entry_price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            entry_price,
            exit_price: None,
            quantity,
            fees: 0.0,
            setup: None,
            tags: Vec::new(),
            notes: None,
        }
    }

    pub fn with_exit(mut self, exit_price: f64) -> Self {
        self.exit_price = Some(exit_price);
        self
    }

    pub fn with_fees(mut self, fees: f64) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Patch applied by `update_trade`
///
/// Every `None` leaves the matching field untouched. Optional trade fields
/// use a nested `Option` so they can be cleared: `Some(None)` removes the
/// value, `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeUpdate {
    pub symbol: Option<String>,
    pub direction: Option<Direction>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<Option<f64>>,
    pub quantity: Option<f64>,
    pub fees: Option<f64>,
    pub setup: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<Option<String>>,
}

impl TradeUpdate {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == TradeUpdate::default()
    }
}

/// A named, dated collection of trades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

impl Session {
    /// Aggregate statistics over the session's trades
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_trades(&self.trades)
    }

    /// Total realized P&L of closed trades
    pub fn total_pnl(&self) -> f64 {
        self.trades.iter().filter_map(Trade::pnl).sum()
    }
}

/// Aggregate statistics for a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub trade_count: usize,
    pub open: usize,
    pub closed: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_pnl: f64,
    pub best: Option<f64>,
    pub worst: Option<f64>,
}

impl SessionSummary {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut summary = SessionSummary {
            trade_count: trades.len(),
            ..Default::default()
        };

        for trade in trades {
            let Some(pnl) = trade.pnl() else {
                summary.open += 1;
                continue;
            };
            summary.closed += 1;
            summary.total_pnl += pnl;
            match trade.outcome() {
                Outcome::Win => summary.wins += 1,
                Outcome::Loss => summary.losses += 1,
                _ => {}
            }
            summary.best = Some(summary.best.map_or(pnl, |b| b.max(pnl)));
            summary.worst = Some(summary.worst.map_or(pnl, |w| w.min(pnl)));
        }

        summary
    }

    /// Share of closed trades that were winners, `None` with no closed trades
    pub fn win_rate(&self) -> Option<f64> {
        if self.closed == 0 {
            None
        } else {
            Some(self.wins as f64 / self.closed as f64)
        }
    }
}

/// The whole application state
///
/// This is the document persisted by storage and written to backups, so it
/// keeps the camelCase key names of the backup format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalState {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub active_session_id: Option<String>,
}
