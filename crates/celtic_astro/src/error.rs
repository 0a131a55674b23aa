//! Error types for astronomical data lookups.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures of an external (or built-in) astronomical data source.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DataSourceError {
    /// The source could not be reached or has no data loaded.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    /// The source answered with a value outside its contract.
    #[error("invalid data for {date}: {reason}")]
    InvalidData { date: NaiveDate, reason: String },
    /// No low-illumination day was found inside the search cap.
    #[error("no new moon within {days} days of {start}")]
    NoNewMoon { start: NaiveDate, days: u32 },
    /// The requested year lies outside the source's validity range.
    #[error("year {year} outside the supported range")]
    OutOfRange { year: i32 },
}

/// Errors from astronomical calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AstroError {
    /// Error from the illumination or seasonal event source.
    #[error("data source error: {0}")]
    DataSource(#[from] DataSourceError),
    /// Malformed date or out-of-domain numeric input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
