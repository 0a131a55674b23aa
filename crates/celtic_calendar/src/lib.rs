//! Celtic lunisolar calendar built on a first-new-moon anchor.
//!
//! This crate provides:
//! - The 13 month names and the fixed 5-year intercalation cycle
//! - Gregorian → Celtic date conversion and its inverse
//! - Festival resolution ("festival today", "next festival")
//! - The parity/phase luck heuristic
//!
//! Anchors (the first new moon of each year) come from an
//! [`AnchorLocator`]; [`NewMoonAnchors`] derives them from any
//! [`celtic_astro::IlluminationSource`].

pub mod anchor;
pub mod convert;
pub mod cycle;
pub mod error;
pub mod festival;
pub mod luck;
pub mod month;

pub use anchor::{AnchorLocator, NewMoonAnchors};
pub use convert::{
    CelticDate, LunisolarYear, OverflowPolicy, from_celtic_date, lunisolar_year_containing,
    lunisolar_year_of, to_celtic_date,
};
pub use cycle::{
    COMMON_YEAR_DAYS, CYCLE_EPOCH_YEAR, CYCLE_YEARS, CycleYear, INTERCALARY_MONTH_DAYS,
    INTERCALARY_POSITIONS, INTERCALARY_YEAR_DAYS, cycle_position, cycle_year, month_lengths,
};
pub use error::CalendarError;
pub use festival::{
    Festival, FestivalOccurrence, FestivalTable, UpcomingFestival, default_festivals,
};
pub use luck::{ALL_LUCK_CATEGORIES, LuckCategory, evaluate_luck};
pub use month::{ALL_MONTHS, CelticMonth};
