//! Astronomical inputs for the Celtic lunisolar calendar.
//!
//! This crate provides:
//! - The [`IlluminationSource`] port and a built-in [`MeanLunarModel`]
//! - Coarse (4-bucket) and fine (8-bucket) lunar phase classification
//! - First-new-moon search used to anchor each lunisolar year
//! - The [`SeasonalEventSource`] port and built-in [`MeanSeasons`]
//!   (equinoxes and solstices)
//!
//! All computations work on whole civil dates (`chrono::NaiveDate`); the
//! moon is sampled at 00:00 UTC of each date.

pub mod error;
pub mod illumination;
pub mod julian;
pub mod mean_moon;
pub mod new_moon;
pub mod phase;
pub mod seasons;

pub use error::{AstroError, DataSourceError};
pub use illumination::{IlluminationSource, LunarReading, checked_reading};
pub use julian::{J2000_JD, jd_from_date, jd_to_centuries, jd_to_datetime};
pub use mean_moon::MeanLunarModel;
pub use new_moon::{
    DEFAULT_MAX_SEARCH_DAYS, DEFAULT_NEW_MOON_THRESHOLD_PERCENT, NewMoonConfig,
    first_new_moon_of_year, first_new_moon_on_or_after,
};
pub use phase::{
    ALL_PHASES, COARSE_SCALE_MAX, FINE_SCALE_MAX, LunarPhase, PhaseReading, classify_coarse,
    classify_fine, try_classify_coarse, try_classify_fine,
};
pub use seasons::{
    ALL_SEASONAL_EVENTS, MEAN_SEASONS_YEARS, MeanSeasons, SeasonalEvent, SeasonalEventSource,
    SeasonalInstant,
};
