use analytics::{AnalyticsEngine, CalendarMonth, CurrencyFormat, build_calendar_grid};
use core_types::{DayStat, EquityPoint, TradeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::BTreeMap;

fn approx(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

#[test]
fn trades_from_store_export() {
    let trades: Vec<TradeRecord> = serde_json::from_value(json!([
        { "profit": 100 },
        { "profit": -50 },
        { "profit": 30 }
    ]))
    .unwrap();

    let series = AnalyticsEngine::new().derive_trade_series(&trades);
    assert_eq!(series.win_count, 2);
    assert_eq!(series.loss_count, 1);
    assert_eq!(series.equity_series, vec![dec!(100), dec!(50), dec!(80)]);
    assert_eq!(series.avg_pl.round_dp(2), dec!(26.67));
}

#[test]
fn pair_distribution_in_first_seen_order() {
    let trades: Vec<TradeRecord> = serde_json::from_value(json!([
        { "Profit__c": 1, "Pair__c": "EUR" },
        { "Profit__c": 1, "Pair__c": "USD" },
        { "Profit__c": -1, "Pair__c": "EUR", "Outcome__c": "Loss" }
    ]))
    .unwrap();

    let series = AnalyticsEngine::new().derive_trade_series(&trades);
    assert_eq!(series.pair_labels, vec!["EUR", "USD"]);
    assert_eq!(series.pair_counts, vec![2, 1]);
}

#[test]
fn intraday_drawdown_across_two_days() {
    let points: Vec<EquityPoint> = serde_json::from_value(json!([
        { "brokerTime": "2024-01-02T09:00", "balance": 1050, "equity": 1000 },
        { "brokerTime": "2024-01-01T11:00", "balance": 1000, "equity": 1050 },
        { "brokerTime": "2024-01-01T10:00", "balance": 1000, "equity": 950 }
    ]))
    .unwrap();

    let series = AnalyticsEngine::new().derive_equity_series(&points);
    assert_eq!(
        series.timestamps,
        vec!["2024-01-01T10:00", "2024-01-01T11:00", "2024-01-02T09:00"]
    );
    assert!(approx(series.drawdown_series[0], -5.0, 1e-9));
    assert!(approx(series.drawdown_series[1], 5.0, 1e-9));
    assert!(approx(series.drawdown_series[2], -4.76, 0.01));
    assert!(approx(series.max_dd_series[0], -5.0, 1e-9));
    assert!(approx(series.max_dd_series[1], -5.0, 1e-9));
    assert!(approx(series.max_dd_series[2], series.drawdown_series[2], 1e-12));
    assert_eq!(series.overall_worst_series.len(), 3);
    assert!(series.overall_worst_series.iter().all(|v| approx(*v, -5.0, 1e-9)));
}

#[test]
fn account_feed_field_names() {
    let points: Vec<EquityPoint> = serde_json::from_value(json!([
        { "brokerTime": "2024-05-01 08:00:00", "lastBalance": "2000", "lastEquity": "1900" },
        { "brokerTime": "2024-05-01 09:00:00", "maxBalance": 2000, "maxEquity": 2100 }
    ]))
    .unwrap();

    let series = AnalyticsEngine::new().derive_equity_series(&points);
    assert_eq!(series.equity_curve, vec![dec!(1900), dec!(2100)]);
    assert!(approx(series.overall_worst, -5.0, 1e-9));
}

#[test]
fn every_month_has_forty_two_cells() {
    let stats = BTreeMap::new();
    for year in [1999, 2000, 2024, 2025, 2100] {
        for month in 1..=12 {
            let target = CalendarMonth::new(year, month);
            let grid = build_calendar_grid(target, &stats, &CurrencyFormat::default());
            assert_eq!(grid.weeks.len(), 6);
            assert!(grid.weeks.iter().all(|w| w.days.len() == 7));

            let leading = grid.weeks[0].days.iter().take_while(|c| !c.in_month).count();
            assert_eq!(leading as u32, target.leading_days());
            assert_eq!(
                grid.cells().filter(|c| c.in_month).count() as u32,
                target.days_in_month()
            );
        }
    }
}

#[test]
fn calendar_month_total_agrees_with_weeks() {
    let stats: Vec<DayStat> = serde_json::from_value(json!([
        { "isoDate": "2025-10-01", "trades": 4, "wins": 3, "totalPnl": 250.75, "pnlPercentage": 2.5 },
        { "isoDate": "2025-10-08", "trades": 2, "wins": 1, "totalPnl": -75.5, "pnlPercentage": -0.75 },
        { "isoDate": "2025-10-31", "trades": 1, "wins": 0, "totalPnl": -10, "pnlPercentage": -0.1 },
        { "isoDate": "2025-11-01", "trades": 9, "wins": 9, "totalPnl": 900, "pnlPercentage": 9 }
    ]))
    .unwrap();
    let stats = DayStat::index_by_date(stats);

    let grid = AnalyticsEngine::new().build_calendar_grid(2025, 10, &stats);
    assert_eq!(grid.month_total, dec!(251) + dec!(-75) + dec!(-10));
    assert_eq!(grid.month_total, grid.in_month_week_total());

    let percentages: Decimal = grid.weeks.iter().map(|w| w.summary.total_percentage).sum();
    assert_eq!(percentages, dec!(1.65));

    // November 1 is drawn in the last row but is outside the month.
    let nov_first = grid.cells().find(|c| c.iso_date == "2025-11-01").unwrap();
    assert!(!nov_first.in_month);
    assert!(nov_first.data.is_some());
}

#[test]
fn calendar_output_serializes_for_the_renderer() {
    let stats = DayStat::index_by_date(vec![DayStat::new("2025-10-02", 2, 1, dec!(-12), dec!(-0.2))]);
    let grid = AnalyticsEngine::new().build_calendar_grid(2025, 10, &stats);
    let value = serde_json::to_value(&grid).unwrap();

    assert_eq!(value["monthLabel"], "October");
    assert_eq!(value["weeks"].as_array().unwrap().len(), 6);
    let cell = &value["weeks"][0]["days"][4];
    assert_eq!(cell["isoDate"], "2025-10-02");
    assert_eq!(cell["data"]["amountFormatted"], "-$12.0");
    assert_eq!(cell["data"]["tone"], "negative");
}
