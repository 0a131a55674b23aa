//! Julian Date helpers for civil dates.
//!
//! Civil dates are taken at 00:00 UTC. The built-in models ignore the
//! TT-UTC offset (about a minute), which is far below their accuracy.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of 2000-01-01T00:00.
const JD_2000_MIDNIGHT: f64 = 2_451_544.5;

const DAYS_PER_CENTURY: f64 = 36_525.0;

fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Julian Date at 00:00 UTC of a civil date.
pub fn jd_from_date(date: NaiveDate) -> f64 {
    let days = date.signed_duration_since(epoch_date()).num_days();
    JD_2000_MIDNIGHT + days as f64
}

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Convert a Julian Date to a civil date-time, rounded to the second.
///
/// Returns `None` for non-finite input or dates outside chrono's range.
pub fn jd_to_datetime(jd: f64) -> Option<NaiveDateTime> {
    if !jd.is_finite() {
        return None;
    }
    let seconds = ((jd - JD_2000_MIDNIGHT) * 86_400.0).round();
    if seconds.abs() > 1.0e15 {
        return None;
    }
    let delta = TimeDelta::try_seconds(seconds as i64)?;
    epoch_date().and_hms_opt(0, 0, 0)?.checked_add_signed(delta)
}
