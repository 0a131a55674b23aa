//! Convenience almanac over the Celtic lunisolar calendar.
//!
//! [`Almanac`] ties together the illumination source, the seasonal event
//! source, the configured festival table and an anchor cache, and exposes
//! date-in, answer-out queries.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use celtic_rs::*;
//!
//! let almanac = Almanac::new(AlmanacConfig::load("almanac.toml")?)?;
//! let date = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();
//! let report = almanac.day_report(date, 0)?;
//! println!("{} ({})", report.celtic, report.phase);
//! ```

pub mod almanac;
pub mod error;
pub mod report;

pub use almanac::Almanac;
pub use error::AlmanacError;
pub use report::{DayReport, FORECAST_DAYS, LuckForecast, PhaseForecast, SeasonalCountdown};

// Re-export the types the almanac speaks so callers need only this crate.
pub use celtic_astro::{
    DataSourceError, IlluminationSource, LunarPhase, LunarReading, MeanLunarModel, MeanSeasons,
    SeasonalEvent, SeasonalEventSource, SeasonalInstant,
};
pub use celtic_calendar::{
    ALL_LUCK_CATEGORIES, ALL_MONTHS, CelticDate, CelticMonth, CycleYear, Festival,
    FestivalOccurrence, FestivalTable, LuckCategory, LunisolarYear, OverflowPolicy,
    UpcomingFestival,
};
pub use celtic_config::{AlmanacConfig, ConfigError};
pub use chrono::NaiveDate;
