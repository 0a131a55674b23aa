//! The illumination port consumed by the calendar.
//!
//! An [`IlluminationSource`] answers, for a civil date, how much of the
//! lunar disk is lit and whether the moon is waxing. Sources must be
//! deterministic: the same date always yields the same reading.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::DataSourceError;

/// Lunar illumination on a given date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarReading {
    /// Illuminated fraction of the disk, in percent (0..=100).
    pub illumination_percent: f64,
    /// True between new moon and full moon.
    pub waxing: bool,
}

impl LunarReading {
    pub fn new(illumination_percent: f64, waxing: bool) -> Self {
        Self {
            illumination_percent,
            waxing,
        }
    }

    /// Position on the 0..=200 synodic scale (0 = new, 100 = full, 200 = new).
    pub fn synodic_position(&self) -> f64 {
        if self.waxing {
            self.illumination_percent
        } else {
            200.0 - self.illumination_percent
        }
    }
}

/// Source of lunar illumination readings.
pub trait IlluminationSource: Send + Sync {
    /// Reading for the given date.
    fn reading(&self, date: NaiveDate) -> Result<LunarReading, DataSourceError>;

    /// Illuminated fraction in percent.
    fn illumination_percent(&self, date: NaiveDate) -> Result<f64, DataSourceError> {
        Ok(self.reading(date)?.illumination_percent)
    }
}

impl<T: IlluminationSource + ?Sized> IlluminationSource for &T {
    fn reading(&self, date: NaiveDate) -> Result<LunarReading, DataSourceError> {
        (**self).reading(date)
    }
}

impl<T: IlluminationSource + ?Sized> IlluminationSource for Arc<T> {
    fn reading(&self, date: NaiveDate) -> Result<LunarReading, DataSourceError> {
        (**self).reading(date)
    }
}

impl<T: IlluminationSource + ?Sized> IlluminationSource for Box<T> {
    fn reading(&self, date: NaiveDate) -> Result<LunarReading, DataSourceError> {
        (**self).reading(date)
    }
}

/// Query a source and reject readings outside its contract.
pub fn checked_reading<S: IlluminationSource + ?Sized>(
    source: &S,
    date: NaiveDate,
) -> Result<LunarReading, DataSourceError> {
    let reading = source.reading(date)?;
    let pct = reading.illumination_percent;
    if !pct.is_finite() {
        return Err(DataSourceError::InvalidData {
            date,
            reason: format!("illumination is not finite ({pct})"),
        });
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(DataSourceError::InvalidData {
            date,
            reason: format!("illumination {pct} outside 0..=100"),
        });
    }
    Ok(reading)
}
