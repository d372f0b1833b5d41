// In crates/analytics/src/trade_series.rs

use crate::types::DerivedTradeSeries;
use core_types::{Outcome, TradeRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Derives win/loss counts, per-trade and cumulative P/L, the average P/L and the
/// per-pair trade distribution from a list of trades.
///
/// Everything is computed in input order; the cumulative series is indexed by trade
/// sequence, not by time. Missing or malformed fields fall back to the defaults of
/// [`TradeRecord`]'s accessors, so this never fails.
pub fn derive_trade_series(trades: &[TradeRecord]) -> DerivedTradeSeries {
    let mut series = DerivedTradeSeries {
        pl_series: Vec::with_capacity(trades.len()),
        trade_labels: Vec::with_capacity(trades.len()),
        equity_series: Vec::with_capacity(trades.len()),
        ..DerivedTradeSeries::default()
    };

    // Index into `pair_labels` / `pair_counts`, keeping first-seen order.
    let mut pair_slots: HashMap<&str, usize> = HashMap::new();
    let mut running = Decimal::ZERO;

    for (i, trade) in trades.iter().enumerate() {
        let profit = trade.profit();

        match trade.outcome() {
            Outcome::Win => series.win_count += 1,
            Outcome::Loss => series.loss_count += 1,
        }

        series.pl_series.push(profit);
        series.trade_labels.push(format!("T{}", i + 1));

        running = running.saturating_add(profit);
        series.equity_series.push(running);

        let pair = trade.pair();
        match pair_slots.get(pair) {
            Some(&slot) => series.pair_counts[slot] += 1,
            None => {
                pair_slots.insert(pair, series.pair_labels.len());
                series.pair_labels.push(pair.to_string());
                series.pair_counts.push(1);
            }
        }
    }

    if !trades.is_empty() {
        series.avg_pl = running
            .checked_div(Decimal::from(trades.len()))
            .unwrap_or(Decimal::ZERO);
    }

    series
}
