// In crates/analytics/src/lib.rs

//! Pure derivations from raw trading records to chart series and the monthly
//! calendar. Nothing here performs I/O or keeps state between calls.

pub mod calendar;
pub mod engine;
pub mod equity_series;
pub mod error;
pub mod format;
pub mod trade_series;
pub mod types;

pub use calendar::{CalendarMonth, build_calendar_grid};
pub use engine::AnalyticsEngine;
pub use equity_series::derive_equity_series;
pub use error::{Error, Result};
pub use format::CurrencyFormat;
pub use trade_series::derive_trade_series;
pub use types::{
    CalendarGrid, CellData, CellTone, DashboardSeries, DayCell, DerivedEquitySeries,
    DerivedTradeSeries, Week, WeekSummary,
};
