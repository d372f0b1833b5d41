// In crates/analytics/src/equity_series.rs

use crate::types::DerivedEquitySeries;
use core_types::EquityPoint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Derives the equity curve and intraday drawdown series from balance/equity
/// snapshots.
///
/// Points are ordered by `brokerTime` using plain string comparison; points sharing a
/// timestamp keep their input order. Each day's drawdown is measured against the
/// balance of that day's first point. `overall_worst_series` is the worst drawdown of
/// the whole input broadcast to every timestamp, not a running minimum.
pub fn derive_equity_series(points: &[EquityPoint]) -> DerivedEquitySeries {
    let mut sorted: Vec<&EquityPoint> = points.iter().collect();
    sorted.sort_by(|a, b| a.broker_time().cmp(b.broker_time()));

    let mut series = DerivedEquitySeries::with_capacity(sorted.len());

    let mut current_day: Option<&str> = None;
    let mut day_start_balance = Decimal::ZERO;
    let mut worst_today = 0.0_f64;
    let mut global_worst = 0.0_f64;

    for point in sorted {
        let day = point.day();
        if current_day != Some(day) {
            current_day = Some(day);
            day_start_balance = point.balance();
            worst_today = 0.0;
        }

        let equity = point.equity();
        let dd_now = drawdown_pct(equity, day_start_balance);
        worst_today = worst_today.min(dd_now);
        global_worst = global_worst.min(dd_now);

        series.timestamps.push(point.broker_time().to_string());
        series.equity_curve.push(equity);
        series.drawdown_series.push(dd_now);
        series.max_dd_series.push(worst_today);
    }

    series.overall_worst = global_worst;
    series.overall_worst_series = vec![global_worst; series.timestamps.len()];
    series
}

/// Percentage change of `equity` against `reference`. A non-positive reference, or a
/// ratio that does not fit a `Decimal`, gives zero.
pub fn drawdown_pct(equity: Decimal, reference: Decimal) -> f64 {
    if reference <= Decimal::ZERO {
        return 0.0;
    }
    equity
        .checked_sub(reference)
        .and_then(|delta| delta.checked_div(reference))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .and_then(|pct| pct.to_f64())
        .unwrap_or(0.0)
}
