//! Unified error type for the almanac.

use celtic_astro::{AstroError, DataSourceError};
use celtic_calendar::CalendarError;
use celtic_config::ConfigError;
use chrono::NaiveDate;

/// Any failure surfaced by [`Almanac`](crate::Almanac).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum AlmanacError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Astro(#[from] AstroError),
    #[error("{base} offset by {offset} days is not a representable date")]
    DateOutOfRange { base: NaiveDate, offset: i64 },
}

impl From<DataSourceError> for AlmanacError {
    fn from(e: DataSourceError) -> Self {
        Self::Astro(AstroError::DataSource(e))
    }
}
