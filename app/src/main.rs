// In app/src/main.rs

use analytics::{AnalyticsEngine, CalendarMonth};
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use core_types::{DateRange, DayStat, EquityPoint, TradeRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::prelude::*;
mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Derives dashboard chart series and calendar views from exported trading records."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derives win/loss, P/L and pair series from a JSON array of trades.
    Trades {
        /// Path to the exported trades.
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Derives the equity curve and drawdown series from a JSON array of snapshots.
    Equity {
        /// Path to the exported equity snapshots.
        #[arg(short, long)]
        input: PathBuf,

        /// Only keep snapshots on or after this date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<String>,

        /// Only keep snapshots on or before this date (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Builds the monthly calendar from per-day statistics (JSON array or TOML fixture).
    Calendar {
        /// Path to the per-day statistics.
        #[arg(short, long)]
        input: PathBuf,

        /// Month to show: a name ("October"), a number, or YYYY-MM. Defaults to this month.
        #[arg(short, long)]
        month: Option<String>,

        /// Year of the month. Defaults to the current year.
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Derives the trade and equity series together.
    Dashboard {
        #[arg(long)]
        trades: PathBuf,

        #[arg(long)]
        equity: PathBuf,
    },

    /// Prints a plain-text performance summary instead of JSON.
    Summary {
        #[arg(long)]
        trades: PathBuf,

        #[arg(long)]
        equity: Option<PathBuf>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings()?;

    // Logs go to stderr so stdout carries only the derived JSON.
    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    tracing::info!(environment = %settings.app.environment, "Starting tradelens");

    let engine = AnalyticsEngine::with_currency(settings.display.currency.clone());
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Trades { input } => {
            let trades: Vec<TradeRecord> = read_json(&input)?;
            print_json(&engine.derive_trade_series(&trades))?;
        }
        Commands::Equity {
            input,
            start_date,
            end_date,
        } => {
            let points: Vec<EquityPoint> = read_json(&input)?;
            let points = match resolve_range(start_date, end_date, today)? {
                Some(range) => filter_points(points, &range),
                None => points,
            };
            print_json(&engine.derive_equity_series(&points))?;
        }
        Commands::Calendar { input, month, year } => {
            let target = resolve_month(month.as_deref(), year, today)?;
            let stats = DayStat::index_by_date(read_day_stats(&input)?);
            print_json(&engine.build_calendar(target, &stats))?;
        }
        Commands::Dashboard { trades, equity } => {
            let trades: Vec<TradeRecord> = read_json(&trades)?;
            let points: Vec<EquityPoint> = read_json(&equity)?;
            print_json(&engine.derive_dashboard(&trades, &points))?;
        }
        Commands::Summary { trades, equity } => {
            let trades: Vec<TradeRecord> = read_json(&trades)?;
            let points: Vec<EquityPoint> = match equity {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let dashboard = engine.derive_dashboard(&trades, &points);
            print!("{}", report::render_summary(&dashboard, engine.currency())?);
        }
    }

    tracing::info!("tradelens has finished successfully.");

    Ok(())
}

/// Reads a JSON array of records exported by the record store.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as a JSON array", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "Loaded records.");
    Ok(records)
}

fn read_day_stats(path: &Path) -> Result<Vec<DayStat>> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        let days = app_config::load_day_stats_toml(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        tracing::info!(path = %path.display(), count = days.len(), "Loaded day statistics.");
        Ok(days)
    } else {
        read_json(path)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turns the optional date flags into a range. A single bound is paired with the
/// other end of the current month, moved as needed to keep the range valid.
fn resolve_range(
    start_date: Option<String>,
    end_date: Option<String>,
    today: NaiveDate,
) -> Result<Option<DateRange>> {
    let start = start_date
        .as_deref()
        .map(core_types::range::parse_iso_date)
        .transpose()?;
    let end = end_date
        .as_deref()
        .map(core_types::range::parse_iso_date)
        .transpose()?;

    let range = match (start, end) {
        (None, None) => return Ok(None),
        (Some(start), Some(end)) => DateRange::new(start, end),
        (Some(start), None) => DateRange::current_month(today).with_start(start),
        (None, Some(end)) => DateRange::current_month(today).with_end(end),
    };
    tracing::info!(start = %range.start(), end = %range.end(), "Filtering snapshots by date.");
    Ok(Some(range))
}

fn filter_points(points: Vec<EquityPoint>, range: &DateRange) -> Vec<EquityPoint> {
    points
        .into_iter()
        .filter(|point| range.contains_day(point.broker_time()))
        .collect()
}

fn resolve_month(month: Option<&str>, year: Option<i32>, today: NaiveDate) -> Result<CalendarMonth> {
    let year = year.unwrap_or_else(|| today.year());
    let target = match month {
        Some(raw) if raw.contains('-') => raw.parse::<CalendarMonth>()?,
        Some(raw) => CalendarMonth::parse_in_year(year, raw)?,
        None => CalendarMonth::new(year, today.month()),
    };
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_range_with_single_bound() {
        let today = date(2025, 10, 19);
        assert!(resolve_range(None, None, today).unwrap().is_none());

        let range = resolve_range(Some("2025-10-05".into()), None, today).unwrap().unwrap();
        assert_eq!(range.start(), date(2025, 10, 5));
        assert_eq!(range.end(), date(2025, 10, 31));

        let range = resolve_range(None, Some("2025-09-15".into()), today).unwrap().unwrap();
        assert_eq!(range.start(), date(2025, 9, 15));
        assert_eq!(range.end(), date(2025, 9, 15));

        assert!(resolve_range(Some("yesterday".into()), None, today).is_err());
    }

    #[test]
    fn test_filter_points_by_day() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1));
        let kept = filter_points(
            vec![
                EquityPoint::new("2024-01-01T23:59", dec!(1), dec!(1)),
                EquityPoint::new("2024-01-02T00:00", dec!(1), dec!(1)),
            ],
            &range,
        );
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_resolve_month() {
        let today = date(2025, 10, 19);
        assert_eq!(resolve_month(None, None, today).unwrap(), CalendarMonth::new(2025, 10));
        assert_eq!(
            resolve_month(Some("March"), Some(2024), today).unwrap(),
            CalendarMonth::new(2024, 3)
        );
        assert_eq!(
            resolve_month(Some("2023-12"), Some(2024), today).unwrap(),
            CalendarMonth::new(2023, 12)
        );
        assert!(resolve_month(Some("Smarch"), None, today).is_err());
    }

    #[test]
    fn test_read_day_stats_from_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("days.json");
        std::fs::write(&json_path, r#"[{ "isoDate": "2025-10-01", "trades": 2, "wins": 1 }]"#).unwrap();
        assert_eq!(read_day_stats(&json_path).unwrap()[0].trades(), 2);

        let toml_path = dir.path().join("days.TOML");
        std::fs::write(&toml_path, "[[days]]\nisoDate = \"2025-10-01\"\ntrades = 4\n").unwrap();
        assert_eq!(read_day_stats(&toml_path).unwrap()[0].trades(), 4);
    }
}
