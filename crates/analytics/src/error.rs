// In crates/analytics/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unrecognised month '{0}': expected a month name or a number from 1 to 12")]
    InvalidMonth(String),

    #[error("Invalid year '{0}'")]
    InvalidYear(String),
}

pub type Result<T> = std::result::Result<T, Error>;
