//! Lunisolar year anchors.
//!
//! An [`AnchorLocator`] maps a Gregorian year to the date of its first new
//! moon. The calendar only ever asks for anchors through this seam, so a
//! caller can memoize, or tests can supply a fixed table.

use celtic_astro::{IlluminationSource, NewMoonConfig, first_new_moon_of_year};
use chrono::NaiveDate;

use crate::error::CalendarError;

/// Source of lunisolar year anchors.
pub trait AnchorLocator {
    /// First new moon on or after January 1 of `year`.
    fn anchor_for_year(&self, year: i32) -> Result<NaiveDate, CalendarError>;
}

impl<T: AnchorLocator + ?Sized> AnchorLocator for &T {
    fn anchor_for_year(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        (**self).anchor_for_year(year)
    }
}

/// Anchors computed on every call by scanning an illumination source.
#[derive(Debug, Clone)]
pub struct NewMoonAnchors<S> {
    source: S,
    config: NewMoonConfig,
}

impl<S: IlluminationSource> NewMoonAnchors<S> {
    pub fn new(source: S, config: NewMoonConfig) -> Self {
        Self { source, config }
    }

    pub fn with_defaults(source: S) -> Self {
        Self::new(source, NewMoonConfig::default())
    }
}

impl<S: IlluminationSource> AnchorLocator for NewMoonAnchors<S> {
    fn anchor_for_year(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        Ok(first_new_moon_of_year(&self.source, year, &self.config)?)
    }
}
