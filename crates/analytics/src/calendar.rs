// In crates/analytics/src/calendar.rs

use crate::error::{Error, Result};
use crate::format::{CurrencyFormat, round_half_up, round_half_up_f64, round_to_tenth};
use crate::types::{CalendarGrid, CellData, CellTone, DayCell, Week, WeekSummary};
use chrono::{Datelike, Days, Month, Months, NaiveDate};
use core_types::DayStat;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// A `(year, month)` pair the calendar can be built for.
///
/// Months are clamped to 1..=12 and years to a range where the whole 42-day grid,
/// including the padding from adjacent months, is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Self {
        let min_year = NaiveDate::MIN.year() + 1;
        let max_year = NaiveDate::MAX.year() - 1;
        Self {
            year: year.clamp(min_year, max_year),
            month: month.clamp(1, 12),
        }
    }

    /// The month containing `date` (the calendar's "today" button).
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Parses a month given by name (`"October"`, `"oct"`) or by number (`"10"`)
    /// for the given year. Out-of-range numbers are clamped like [`CalendarMonth::new`].
    pub fn parse_in_year(year: i32, month: &str) -> Result<Self> {
        Ok(Self::new(year, parse_month(month)?))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// English month name, e.g. `"October"`.
    pub fn label(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or_default()
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(28)
    }

    /// Number of padding cells before the 1st: its weekday with Sunday as 0.
    pub fn leading_days(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Whether an ISO date key (`YYYY-MM-DD`) belongs to this month. Only the year and
    /// month components are inspected.
    pub fn contains_key(&self, iso_date: &str) -> bool {
        let mut parts = iso_date.split('-');
        let year = parts.next().and_then(|y| y.trim().parse::<i32>().ok());
        let month = parts.next().and_then(|m| m.trim().parse::<u32>().ok());
        year == Some(self.year) && month == Some(self.month)
    }
}

/// `YYYY-MM`, `YYYY-<month name>`.
impl FromStr for CalendarMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::InvalidMonth(s.to_string()))?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::InvalidYear(year.to_string()))?;
        Self::parse_in_year(year, month)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.year)
    }
}

fn parse_month(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(number.clamp(1, 12) as u32);
    }
    Month::from_str(trimmed)
        .map(|m| m.number_from_month())
        .map_err(|_| Error::InvalidMonth(raw.to_string()))
}

/// Lays out `month` as a 6×7 grid, attaches the statistics of each day found in
/// `stats`, and aggregates every week over its in-month days.
pub fn build_calendar_grid(
    month: CalendarMonth,
    stats: &BTreeMap<String, DayStat>,
    currency: &CurrencyFormat,
) -> CalendarGrid {
    let first = month.first_day();
    let grid_start = first
        .checked_sub_days(Days::new(u64::from(month.leading_days())))
        .unwrap_or(first);

    let cells: Vec<DayCell> = grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| build_cell(date, month, stats, currency))
        .collect();

    let weeks: Vec<Week> = cells
        .chunks(DAYS_PER_WEEK)
        .enumerate()
        .map(|(row, days)| Week {
            row,
            summary: summarize_week(row, days, currency),
            days: days.to_vec(),
        })
        .collect();

    let month_total = month_total(month, stats);

    CalendarGrid {
        year: month.year(),
        month: month.month(),
        month_label: month.label().to_string(),
        weeks,
        month_total,
        month_total_formatted: currency.format(month_total),
    }
}

fn build_cell(
    date: NaiveDate,
    month: CalendarMonth,
    stats: &BTreeMap<String, DayStat>,
    currency: &CurrencyFormat,
) -> DayCell {
    let iso_date = date.format("%Y-%m-%d").to_string();
    let in_month = date.year() == month.year() && date.month() == month.month();
    let data = stats.get(&iso_date).map(|stat| cell_data(stat, currency));

    let title = match &data {
        Some(data) => format!(
            "{}: {} • {} trades • {}%",
            iso_date, data.amount_formatted, data.trades, data.win_rate
        ),
        None => iso_date.clone(),
    };

    DayCell {
        date,
        day: date.day(),
        iso_date,
        in_month,
        data,
        title,
    }
}

fn cell_data(stat: &DayStat, currency: &CurrencyFormat) -> CellData {
    let amount = round_half_up(stat.total_pnl());
    let trades = stat.trades();
    let win_rate = round_to_tenth(stat.win_rate());
    let wins = wins_from_rate(trades, win_rate);

    CellData {
        amount,
        trades,
        win_rate,
        wins,
        losses: trades - wins,
        percentage: stat.pnl_percentage(),
        amount_formatted: currency.format(amount),
        tone: CellTone::of(amount),
    }
}

/// Recovers a win count from a rounded win rate. Capped at `trades` so the loss count
/// never goes negative when the source reports more wins than trades.
fn wins_from_rate(trades: u32, win_rate: f64) -> u32 {
    let wins = round_half_up_f64(f64::from(trades) * win_rate / 100.0);
    (wins.max(0.0) as u32).min(trades)
}

fn summarize_week(row: usize, days: &[DayCell], currency: &CurrencyFormat) -> WeekSummary {
    let mut summary = WeekSummary::default();

    for data in days
        .iter()
        .filter(|cell| cell.in_month)
        .filter_map(|cell| cell.data.as_ref())
    {
        summary.total_amount = summary.total_amount.saturating_add(data.amount);
        summary.total_percentage = summary.total_percentage.saturating_add(data.percentage);
        summary.total_trades = summary.total_trades.saturating_add(data.trades);
        summary.total_wins = summary.total_wins.saturating_add(data.wins);
        summary.total_losses = summary.total_losses.saturating_add(data.losses);
    }

    if summary.total_trades > 0 {
        let ratio = f64::from(summary.total_wins) / f64::from(summary.total_trades);
        summary.win_rate = round_half_up_f64(ratio * 1000.0) / 10.0;
    }

    summary.total_formatted = currency.format(summary.total_amount);
    summary.title = format!("Week {} total: {}", row + 1, summary.total_formatted);
    summary
}

/// Month total taken straight from the sparse statistics, independently of the grid.
fn month_total(month: CalendarMonth, stats: &BTreeMap<String, DayStat>) -> Decimal {
    stats
        .iter()
        .filter(|(iso_date, _)| month.contains_key(iso_date))
        .map(|(_, stat)| round_half_up(stat.total_pnl()))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
