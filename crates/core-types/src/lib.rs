// In crates/core-types/src/lib.rs

pub mod coerce;
pub mod error;
pub mod range;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use range::DateRange;
pub use types::{DayStat, EquityPoint, Outcome, TradeRecord, UNKNOWN_PAIR};
