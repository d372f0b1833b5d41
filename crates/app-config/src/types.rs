// In crates/app-config/src/types.rs

use analytics::CurrencyFormat;
use core_types::DayStat;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// How derived values are presented.
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DisplaySettings {
    #[serde(default)]
    pub currency: CurrencyFormat,
}

// --- Structs for day statistics fixtures ---

/// A TOML file of per-day statistics, one `[[days]]` table per trading day.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DayStatsFile {
    #[serde(default)]
    pub days: Vec<DayStat>,
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }
