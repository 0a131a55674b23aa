//! Error types for calendar calculations.

use celtic_astro::{AstroError, DataSourceError};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors from Celtic calendar calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Error from the astronomical layer (data source or bad input there).
    #[error("astro error: {0}")]
    Astro(#[from] AstroError),
    /// The day offset ran past every month of the anchored year.
    ///
    /// This signals an anchoring defect: the next year's anchor lies
    /// further away than the cycle year is long.
    #[error(
        "anchoring inconsistency: {date} is {delta_days} days after anchor {anchor}, \
         but the lunisolar year has only {year_days} days"
    )]
    AnchoringInconsistency {
        date: NaiveDate,
        anchor: NaiveDate,
        delta_days: i64,
        year_days: u32,
    },
    /// Malformed date, month or day.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<DataSourceError> for CalendarError {
    fn from(e: DataSourceError) -> Self {
        Self::Astro(AstroError::DataSource(e))
    }
}
