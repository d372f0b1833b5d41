// In crates/analytics/src/format.rs

//! Rounding and display helpers shared by the derivers.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Rounds to the nearest integer with halves going towards positive infinity,
/// so `2.5` becomes `3` and `-2.5` becomes `-2`.
pub fn round_half_up(value: Decimal) -> Decimal {
    value
        .checked_add(dec!(0.5))
        .map(|shifted| shifted.floor())
        .unwrap_or_else(|| value.round())
}

/// `f64` counterpart of [`round_half_up`].
pub fn round_half_up_f64(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds a percentage to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up_f64((value + f64::EPSILON) * 10.0) / 10.0
}

/// How monetary amounts are rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_max_fraction_digits")]
    pub max_fraction_digits: u32,
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_max_fraction_digits() -> u32 {
    1
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            max_fraction_digits: default_max_fraction_digits(),
        }
    }
}

impl CurrencyFormat {
    /// Formats an amount as `-$1,234.5`: sign first, then the symbol, grouped
    /// thousands and exactly `max_fraction_digits` decimals. A negative amount that
    /// rounds to zero keeps its sign (`-$0.0`).
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount
            .abs()
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.to_string();
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let width = self.max_fraction_digits as usize;

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + width + 4);
        if amount.is_sign_negative() && !amount.is_zero() {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(int_part));
        if width > 0 {
            out.push('.');
            out.push_str(&format!("{frac_part:0<width$}"));
        }
        out
    }
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(2.5)), dec!(3));
        assert_eq!(round_half_up(dec!(-2.5)), dec!(-2));
        assert_eq!(round_half_up(dec!(-2.51)), dec!(-3));
        assert_eq!(round_half_up(dec!(1234.49)), dec!(1234));
        assert_eq!(round_half_up_f64(0.5), 1.0);
        assert_eq!(round_half_up_f64(-0.5), 0.0);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(66.666_666), 66.7);
        assert_eq!(round_to_tenth(75.0), 75.0);
        assert_eq!(round_to_tenth(0.05), 0.1);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn test_currency_format() {
        let usd = CurrencyFormat::default();
        assert_eq!(usd.format(dec!(0)), "$0.0");
        assert_eq!(usd.format(dec!(950)), "$950.0");
        assert_eq!(usd.format(dec!(1234)), "$1,234.0");
        assert_eq!(usd.format(dec!(1234567.25)), "$1,234,567.3");
        assert_eq!(usd.format(dec!(-50)), "-$50.0");
        assert_eq!(usd.format(dec!(-1000.04)), "-$1,000.0");
        assert_eq!(usd.format(dec!(-0.01)), "-$0.0");
        assert_eq!(usd.format(dec!(12.500)), "$12.5");
    }

    #[test]
    fn test_currency_format_custom_symbol_and_digits() {
        let eur = CurrencyFormat {
            symbol: "€".to_string(),
            max_fraction_digits: 2,
        };
        assert_eq!(eur.format(dec!(12.5)), "€12.50");
        assert_eq!(eur.format(dec!(12.345)), "€12.35");
        assert_eq!(eur.format(dec!(999999.999)), "€1,000,000.00");

        let whole = CurrencyFormat {
            symbol: "$".to_string(),
            max_fraction_digits: 0,
        };
        assert_eq!(whole.format(dec!(1499.5)), "$1,500");
        assert_eq!(whole.format(dec!(-0.4)), "-$0");
    }
}
