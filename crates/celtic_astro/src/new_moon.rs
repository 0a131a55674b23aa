//! First-new-moon search.
//!
//! The lunisolar year is anchored on the first date, on or after
//! January 1, whose illumination falls below a near-zero threshold.
//! The scan advances one day at a time and gives up after
//! `max_search_days`, so a malfunctioning source cannot loop forever.

use chrono::{Days, NaiveDate};

use crate::error::{AstroError, DataSourceError};
use crate::illumination::{IlluminationSource, checked_reading};

/// Illumination (percent) below which a date counts as new moon.
pub const DEFAULT_NEW_MOON_THRESHOLD_PERCENT: f64 = 1.0;

/// Days scanned before the search is abandoned. A synodic month is ~29.5 days.
pub const DEFAULT_MAX_SEARCH_DAYS: u32 = 40;

/// Upper limit accepted for `max_search_days`.
const MAX_SEARCH_DAYS_LIMIT: u32 = 400;

/// New-moon search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewMoonConfig {
    pub threshold_percent: f64,
    pub max_search_days: u32,
}

impl Default for NewMoonConfig {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_NEW_MOON_THRESHOLD_PERCENT,
            max_search_days: DEFAULT_MAX_SEARCH_DAYS,
        }
    }
}

impl NewMoonConfig {
    pub fn new(threshold_percent: f64, max_search_days: u32) -> Self {
        Self {
            threshold_percent,
            max_search_days,
        }
    }

    pub fn validate(&self) -> Result<(), AstroError> {
        if !self.threshold_percent.is_finite()
            || self.threshold_percent <= 0.0
            || self.threshold_percent > 100.0
        {
            return Err(AstroError::InvalidInput(format!(
                "new moon threshold {} outside (0, 100]",
                self.threshold_percent
            )));
        }
        if self.max_search_days == 0 || self.max_search_days > MAX_SEARCH_DAYS_LIMIT {
            return Err(AstroError::InvalidInput(format!(
                "max_search_days {} outside 1..={MAX_SEARCH_DAYS_LIMIT}",
                self.max_search_days
            )));
        }
        Ok(())
    }
}

/// First date on or after `start` whose illumination is below the threshold.
pub fn first_new_moon_on_or_after<S: IlluminationSource + ?Sized>(
    source: &S,
    start: NaiveDate,
    config: &NewMoonConfig,
) -> Result<NaiveDate, AstroError> {
    config.validate()?;
    for offset in 0..config.max_search_days {
        let date = start
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| AstroError::InvalidInput(format!("date overflow after {start}")))?;
        let reading = checked_reading(source, date)?;
        if reading.illumination_percent < config.threshold_percent {
            tracing::debug!(%start, %date, iterations = offset + 1, "new moon found");
            return Ok(date);
        }
    }
    Err(DataSourceError::NoNewMoon {
        start,
        days: config.max_search_days,
    }
    .into())
}

/// First new moon on or after January 1 of `year`: the lunisolar year anchor.
pub fn first_new_moon_of_year<S: IlluminationSource + ?Sized>(
    source: &S,
    year: i32,
    config: &NewMoonConfig,
) -> Result<NaiveDate, AstroError> {
    let jan_1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AstroError::InvalidInput(format!("year {year} out of range")))?;
    first_new_moon_on_or_after(source, jan_1, config)
}
