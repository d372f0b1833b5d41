// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use core_types::DayStat;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DayStatsFile, DisplaySettings, Settings};

/// Loads the application settings from the `config/` directory of the working directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a `base.toml` file in `dir`, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables (e.g., `APP_APP__LOG_LEVEL=debug`).
pub fn load_settings_from(dir: impl AsRef<Path>) -> Result<Settings> {
    let dir = dir.as_ref();
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::with_name(&dir.join("base").to_string_lossy()).required(false))
        .add_source(File::with_name(&dir.join(&environment).to_string_lossy()).required(false))
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Loads per-day statistics from a TOML fixture.
pub fn load_day_stats_toml(path: impl AsRef<Path>) -> Result<Vec<DayStat>> {
    let content = std::fs::read_to_string(path)?;

    let file: DayStatsFile = toml::from_str(&content)?;
    Ok(file.days)
}
