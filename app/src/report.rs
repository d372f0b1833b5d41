// In app/src/report.rs

use analytics::{CurrencyFormat, DashboardSeries};
use std::fmt::{self, Write};

const TOP_PAIRS: usize = 5;

/// Renders a short, human-readable performance summary.
pub fn render_summary(
    dashboard: &DashboardSeries,
    currency: &CurrencyFormat,
) -> Result<String, fmt::Error> {
    let trades = &dashboard.trades;
    let equity = &dashboard.equity;
    let mut out = String::new();

    writeln!(out, "\n--- Performance Summary ---")?;
    writeln!(out, "---------------------------")?;
    writeln!(
        out,
        "Trades: {} | Wins: {} | Losses: {} | Win Rate: {}%",
        trades.trade_count(),
        trades.win_count,
        trades.loss_count,
        trades.win_rate_pct()
    )?;
    writeln!(
        out,
        "Total P/L: {} | Average P/L: {}",
        currency.format(trades.total_pl()),
        currency.format(trades.avg_pl)
    )?;

    if !trades.pair_labels.is_empty() {
        let mut pairs: Vec<(&String, &u32)> =
            trades.pair_labels.iter().zip(&trades.pair_counts).collect();
        // Stable sort: ties keep first-seen order.
        pairs.sort_by(|a, b| b.1.cmp(a.1));
        writeln!(out, "\nMost traded pairs:")?;
        for (pair, count) in pairs.into_iter().take(TOP_PAIRS) {
            writeln!(out, "  - {pair}: {count}")?;
        }
    }

    if equity.is_empty() {
        writeln!(out, "\nNo equity snapshots in range.")?;
    } else {
        let first = equity.timestamps.first().map(String::as_str).unwrap_or_default();
        let last = equity.timestamps.last().map(String::as_str).unwrap_or_default();
        let latest_equity = equity.equity_curve.last().copied().unwrap_or_default();
        writeln!(out, "\nEquity snapshots: {} ({} → {})", equity.len(), first, last)?;
        writeln!(
            out,
            "Latest Equity: {} | Worst Intraday Drawdown: {:.2}%",
            currency.format(latest_equity),
            equity.overall_worst
        )?;
    }
    writeln!(out, "---------------------------")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use core_types::{EquityPoint, TradeRecord};
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_lists_headline_figures() {
        let engine = AnalyticsEngine::new();
        let dashboard = engine.derive_dashboard(
            &[
                TradeRecord::new(dec!(100)).with_pair("EURUSD"),
                TradeRecord::new(dec!(-50)).with_pair("GBPUSD"),
                TradeRecord::new(dec!(30)).with_pair("GBPUSD"),
            ],
            &[
                EquityPoint::new("2024-01-01T10:00", dec!(1000), dec!(950)),
                EquityPoint::new("2024-01-01T11:00", dec!(1000), dec!(1080)),
            ],
        );

        let text = render_summary(&dashboard, engine.currency()).unwrap();
        assert!(text.contains("Trades: 3 | Wins: 2 | Losses: 1 | Win Rate: 67%"));
        assert!(text.contains("Total P/L: $80.0 | Average P/L: $26.7"));
        assert!(text.contains("  - GBPUSD: 2\n  - EURUSD: 1"));
        assert!(text.contains("Latest Equity: $1,080.0 | Worst Intraday Drawdown: -5.00%"));
    }

    #[test]
    fn test_summary_without_equity() {
        let dashboard = AnalyticsEngine::new().derive_dashboard(&[], &[]);
        let text = render_summary(&dashboard, &CurrencyFormat::default()).unwrap();
        assert!(text.contains("Trades: 0"));
        assert!(text.contains("No equity snapshots in range."));
        assert!(!text.contains("Most traded pairs"));
    }
}
