// In crates/analytics/src/engine.rs

use crate::calendar::{self, CalendarMonth};
use crate::equity_series::derive_equity_series;
use crate::format::CurrencyFormat;
use crate::trade_series::derive_trade_series;
use crate::types::{CalendarGrid, DashboardSeries, DerivedEquitySeries, DerivedTradeSeries};
use core_types::{DayStat, EquityPoint, TradeRecord};
use std::collections::BTreeMap;

/// The engine responsible for turning raw trade, equity and daily records into chart
/// and calendar data.
///
/// It is stateless apart from display settings; every call is independent and can be
/// made from any thread.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    currency: CurrencyFormat,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currency(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn derive_trade_series(&self, trades: &[TradeRecord]) -> DerivedTradeSeries {
        let series = derive_trade_series(trades);
        tracing::debug!(
            trades = trades.len(),
            wins = series.win_count,
            losses = series.loss_count,
            pairs = series.pair_labels.len(),
            "Derived trade series."
        );
        series
    }

    pub fn derive_equity_series(&self, points: &[EquityPoint]) -> DerivedEquitySeries {
        let series = derive_equity_series(points);
        tracing::debug!(
            points = points.len(),
            overall_worst = series.overall_worst,
            "Derived equity and drawdown series."
        );
        series
    }

    /// Builds the calendar for `year`/`month`; the month is clamped to 1..=12.
    pub fn build_calendar_grid(
        &self,
        year: i32,
        month: u32,
        stats: &BTreeMap<String, DayStat>,
    ) -> CalendarGrid {
        self.build_calendar(CalendarMonth::new(year, month), stats)
    }

    pub fn build_calendar(
        &self,
        month: CalendarMonth,
        stats: &BTreeMap<String, DayStat>,
    ) -> CalendarGrid {
        let grid = calendar::build_calendar_grid(month, stats, &self.currency);
        let week_total = grid.in_month_week_total();
        if week_total != grid.month_total {
            tracing::warn!(
                %month,
                month_total = %grid.month_total,
                week_total = %week_total,
                "Month total disagrees with the weekly totals; some stats are keyed by malformed dates."
            );
        }
        tracing::debug!(%month, days_with_stats = stats.len(), "Built calendar grid.");
        grid
    }

    /// Derives both dashboard feeds at once.
    pub fn derive_dashboard(
        &self,
        trades: &[TradeRecord],
        points: &[EquityPoint],
    ) -> DashboardSeries {
        DashboardSeries {
            trades: self.derive_trade_series(trades),
            equity: self.derive_equity_series(points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dashboard_combines_both_series() {
        let engine = AnalyticsEngine::new();
        let dashboard = engine.derive_dashboard(
            &[TradeRecord::new(dec!(5)), TradeRecord::new(dec!(-2))],
            &[EquityPoint::new("2024-01-01T00:00", dec!(100), dec!(99))],
        );
        assert_eq!(dashboard.trades.total_pl(), dec!(3));
        assert_eq!(dashboard.equity.len(), 1);
    }

    #[test]
    fn test_engine_uses_configured_currency() {
        let engine = AnalyticsEngine::with_currency(CurrencyFormat {
            symbol: "£".to_string(),
            max_fraction_digits: 0,
        });
        let stats = DayStat::index_by_date(vec![DayStat::new("2025-10-01", 1, 1, dec!(1500), dec!(0))]);
        let grid = engine.build_calendar_grid(2025, 10, &stats);
        assert_eq!(grid.month_total_formatted, "£1,500");
    }
}
