// In crates/analytics/src/types.rs

use crate::format::round_half_up_f64;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Series derived from a list of trades, in trade (input) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTradeSeries {
    pub win_count: u32,
    pub loss_count: u32,
    /// P/L of each trade.
    pub pl_series: Vec<Decimal>,
    /// `T1`, `T2`, ... one per trade.
    pub trade_labels: Vec<String>,
    /// Running sum of `pl_series`.
    pub equity_series: Vec<Decimal>,
    #[serde(rename = "avgPL")]
    pub avg_pl: Decimal,
    /// Pairs in the order they were first seen, parallel to `pair_counts`.
    pub pair_labels: Vec<String>,
    pub pair_counts: Vec<u32>,
}

impl DerivedTradeSeries {
    pub fn trade_count(&self) -> usize {
        self.pl_series.len()
    }

    /// Cumulative P/L after the last trade.
    pub fn total_pl(&self) -> Decimal {
        self.equity_series.last().copied().unwrap_or(Decimal::ZERO)
    }

    /// Whole-number win percentage shown at the centre of the win/loss chart.
    pub fn win_rate_pct(&self) -> u32 {
        let total = match self.win_count + self.loss_count {
            0 => 1,
            n => n,
        };
        round_half_up_f64(f64::from(self.win_count) / f64::from(total) * 100.0) as u32
    }

    /// `avg_pl` repeated once per trade, for drawing the average line.
    pub fn average_series(&self) -> Vec<Decimal> {
        vec![self.avg_pl; self.pl_series.len()]
    }
}

/// Series derived from balance/equity snapshots, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedEquitySeries {
    pub timestamps: Vec<String>,
    pub equity_curve: Vec<Decimal>,
    /// Equity vs the start-of-day balance, in percent.
    pub drawdown_series: Vec<f64>,
    /// Worst `drawdown_series` value so far within the same day.
    #[serde(rename = "maxDDSeries")]
    pub max_dd_series: Vec<f64>,
    /// `overall_worst` repeated for every timestamp.
    pub overall_worst_series: Vec<f64>,
    /// Worst drawdown over the whole input.
    pub overall_worst: f64,
}

impl DerivedEquitySeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            equity_curve: Vec::with_capacity(capacity),
            drawdown_series: Vec::with_capacity(capacity),
            max_dd_series: Vec::with_capacity(capacity),
            overall_worst_series: Vec::with_capacity(capacity),
            overall_worst: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Both chart feeds of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSeries {
    pub trades: DerivedTradeSeries,
    pub equity: DerivedEquitySeries,
}

/// Colouring hint for a calendar cell, from the sign of its rounded amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellTone {
    Positive,
    Negative,
    Flat,
}

impl CellTone {
    pub fn of(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            CellTone::Positive
        } else if amount < Decimal::ZERO {
            CellTone::Negative
        } else {
            CellTone::Flat
        }
    }
}

/// Display record for a day that had trading activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    /// Total P/L rounded to a whole amount.
    pub amount: Decimal,
    pub trades: u32,
    /// Win rate in percent, one decimal place.
    pub win_rate: f64,
    pub wins: u32,
    pub losses: u32,
    pub percentage: Decimal,
    pub amount_formatted: String,
    pub tone: CellTone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub iso_date: String,
    pub day: u32,
    pub in_month: bool,
    pub data: Option<CellData>,
    pub title: String,
}

impl DayCell {
    /// A cell outside the displayed month, or one without trading data.
    pub fn is_muted(&self) -> bool {
        !self.in_month || self.data.is_none()
    }
}

/// Aggregate over the in-month cells of one week that carry data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub total_amount: Decimal,
    pub total_trades: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub win_rate: f64,
    pub total_percentage: Decimal,
    pub total_formatted: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub row: usize,
    pub days: Vec<DayCell>,
    pub summary: WeekSummary,
}

/// A month laid out as six weeks of seven days, Sunday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub month_label: String,
    pub weeks: Vec<Week>,
    pub month_total: Decimal,
    pub month_total_formatted: String,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// Sum of the weekly totals. Agrees with `month_total` whenever every stat
    /// for the month is keyed by a well-formed ISO date.
    pub fn in_month_week_total(&self) -> Decimal {
        self.weeks
            .iter()
            .map(|week| week.summary.total_amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
