// In crates/core-types/src/range.rs

use crate::{Error, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar days used to scope the records handed to the
/// derivers. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// The first through the last day of the month containing `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        let first = today.with_day(1).unwrap_or(today);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        Self { start: first, end: last }
    }

    /// Parses `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_iso_date(start)?, parse_iso_date(end)?))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Moves the start bound. If it passes the end, the end follows it.
    pub fn with_start(self, start: NaiveDate) -> Self {
        Self {
            start,
            end: self.end.max(start),
        }
    }

    /// Moves the end bound. If it precedes the start, the start follows it.
    pub fn with_end(self, end: NaiveDate) -> Self {
        Self {
            start: self.start.min(end),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Tests the `YYYY-MM-DD` prefix of a timestamp or ISO date. Strings without a
    /// parseable date prefix are outside every range.
    pub fn contains_day(&self, timestamp: &str) -> bool {
        timestamp
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, ISO_DATE_FORMAT).ok())
            .is_some_and(|date| self.contains(date))
    }
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|source| {
        Error::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}
