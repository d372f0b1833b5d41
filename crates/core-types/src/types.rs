// In crates/core-types/src/types.rs

use crate::coerce::{lenient_count, lenient_decimal, lenient_string};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Pair label used when a trade record carries no instrument.
pub const UNKNOWN_PAIR: &str = "Unknown";

/// The result of a single trade as far as win/loss statistics are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Interprets an explicit outcome label. Only `win` (any case) is a win;
    /// every other label, recognised or not, counts as a loss.
    pub fn from_label(label: &str) -> Self {
        if label.to_lowercase() == "win" {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    /// Infers the outcome from the sign of the profit. Break-even is a win.
    pub fn from_profit(profit: Decimal) -> Self {
        if profit >= Decimal::ZERO {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// A single trade as exported by the record store.
///
/// Every field is optional on the wire, and the store's `__c` spellings may appear
/// next to the plain ones. Use the accessor methods, which pick the first non-null
/// spelling and then apply the documented fallback, rather than reading the raw fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub profit: Option<Decimal>,
    #[serde(
        default,
        rename = "Profit__c",
        deserialize_with = "lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_profit: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pair: Option<String>,
    #[serde(
        default,
        rename = "Pair__c",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_pair: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub outcome: Option<String>,
    #[serde(
        default,
        rename = "Outcome__c",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_outcome: Option<String>,
}

impl TradeRecord {
    pub fn new(profit: Decimal) -> Self {
        Self {
            profit: Some(profit),
            ..Self::default()
        }
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    /// Signed P/L of the trade; zero when missing or non-numeric.
    pub fn profit(&self) -> Decimal {
        self.profit.or(self.store_profit).unwrap_or(Decimal::ZERO)
    }

    /// Instrument identifier; `"Unknown"` when missing.
    pub fn pair(&self) -> &str {
        self.pair
            .as_deref()
            .or(self.store_pair.as_deref())
            .unwrap_or(UNKNOWN_PAIR)
    }

    /// Explicit outcome when present, otherwise inferred from the profit sign.
    pub fn outcome(&self) -> Outcome {
        match self.outcome.as_deref().or(self.store_outcome.as_deref()) {
            Some(label) => Outcome::from_label(label),
            None => Outcome::from_profit(self.profit()),
        }
    }
}

/// A balance/equity snapshot taken at broker time.
///
/// The account feed reports `lastBalance`/`lastEquity`, other exports use the plain
/// `balance`/`equity` names. Readings resolve in that order and fall back to the
/// `max*` values when neither is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub broker_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_balance: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub balance: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub max_balance: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_equity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub equity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub max_equity: Option<Decimal>,
}

impl EquityPoint {
    pub fn new(broker_time: impl Into<String>, balance: Decimal, equity: Decimal) -> Self {
        Self {
            broker_time: Some(broker_time.into()),
            balance: Some(balance),
            equity: Some(equity),
            ..Self::default()
        }
    }

    /// Broker timestamp, or the empty string when missing.
    pub fn broker_time(&self) -> &str {
        self.broker_time.as_deref().unwrap_or("")
    }

    pub fn balance(&self) -> Decimal {
        self.last_balance
            .or(self.balance)
            .or(self.max_balance)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn equity(&self) -> Decimal {
        self.last_equity
            .or(self.equity)
            .or(self.max_equity)
            .unwrap_or(Decimal::ZERO)
    }

    /// The date portion of the timestamp: its first ten characters. Short or
    /// malformed timestamps are returned whole.
    pub fn day(&self) -> &str {
        let ts = self.broker_time();
        match ts.char_indices().nth(10) {
            Some((idx, _)) => &ts[..idx],
            None => ts,
        }
    }
}

/// Trading statistics for one calendar day, keyed by `iso_date` (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStat {
    #[serde(default)]
    pub iso_date: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub trades: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub wins: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_pnl: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub pnl_percentage: Option<Decimal>,
}

impl DayStat {
    pub fn new(
        iso_date: impl Into<String>,
        trades: u32,
        wins: u32,
        total_pnl: Decimal,
        pnl_percentage: Decimal,
    ) -> Self {
        Self {
            iso_date: iso_date.into(),
            trades: Some(trades),
            wins: Some(wins),
            total_pnl: Some(total_pnl),
            pnl_percentage: Some(pnl_percentage),
        }
    }

    pub fn trades(&self) -> u32 {
        self.trades.unwrap_or(0)
    }

    pub fn wins(&self) -> u32 {
        self.wins.unwrap_or(0)
    }

    pub fn total_pnl(&self) -> Decimal {
        self.total_pnl.unwrap_or(Decimal::ZERO)
    }

    pub fn pnl_percentage(&self) -> Decimal {
        self.pnl_percentage.unwrap_or(Decimal::ZERO)
    }

    /// Wins as a percentage of trades, unrounded; zero on a day without trades.
    pub fn win_rate(&self) -> f64 {
        match self.trades() {
            0 => 0.0,
            trades => f64::from(self.wins()) / f64::from(trades) * 100.0,
        }
    }

    /// Indexes a list of day statistics by ISO date. A later entry for the same date
    /// replaces an earlier one.
    pub fn index_by_date(stats: Vec<DayStat>) -> BTreeMap<String, DayStat> {
        stats
            .into_iter()
            .map(|stat| (stat.iso_date.clone(), stat))
            .collect()
    }
}
