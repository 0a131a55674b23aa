//! Gregorian ↔ Celtic date conversion.
//!
//! A Gregorian date belongs to the lunisolar year whose anchor is the
//! latest anchor on or before it: this year's first new moon, or last
//! year's if the date precedes it. The day offset from that anchor is
//! unrolled across the anchor year's month lengths (not the query
//! year's, since a lunisolar year spans two Gregorian years).

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorLocator;
use crate::cycle::{CycleYear, cycle_year};
use crate::error::CalendarError;
use crate::month::CelticMonth;

/// What to do when a day offset runs past the last month of its year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Return [`CalendarError::AnchoringInconsistency`].
    #[default]
    Fail,
    /// Return Samonios 1 flagged as overflowed, and log a warning.
    FirstMonth,
}

/// A date in the Celtic calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CelticDate {
    pub month: CelticMonth,
    /// 1-based day of month.
    pub day: u32,
    /// Set when this is the [`OverflowPolicy::FirstMonth`] fallback
    /// rather than a real position in the year.
    pub overflowed: bool,
}

impl CelticDate {
    pub fn new(month: CelticMonth, day: u32) -> Self {
        Self {
            month,
            day,
            overflowed: false,
        }
    }
}

impl std::fmt::Display for CelticDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.day)
    }
}

/// One anchored lunisolar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunisolarYear {
    /// First day (Samonios 1).
    pub anchor: NaiveDate,
    /// Month structure, taken from the anchor's Gregorian year.
    pub cycle: CycleYear,
}

impl LunisolarYear {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            cycle: cycle_year(anchor.year()),
        }
    }

    pub fn anchor_year(&self) -> i32 {
        self.anchor.year()
    }

    /// First day after the last month of this year.
    pub fn end(&self) -> Option<NaiveDate> {
        self.anchor
            .checked_add_days(Days::new(u64::from(self.cycle.total_days())))
    }

    /// Month and day `delta_days` after the anchor, or `None` if the
    /// offset is negative or past the last month.
    pub fn celtic_date_at(&self, delta_days: i64) -> Option<CelticDate> {
        let mut remaining = u32::try_from(delta_days).ok()?;
        for (index, &length) in self.cycle.month_lengths.iter().enumerate() {
            if remaining < length {
                return CelticMonth::from_index(index).map(|m| CelticDate::new(m, remaining + 1));
            }
            remaining -= length;
        }
        None
    }

    /// Gregorian date of `month`/`day` in this year.
    pub fn date_of(&self, month: CelticMonth, day: u32) -> Result<NaiveDate, CalendarError> {
        let index = month.index();
        let (Some(before), Some(length)) =
            (self.cycle.days_before(index), self.cycle.month_length(index))
        else {
            return Err(CalendarError::InvalidInput(format!(
                "{month} does not occur in the year anchored {}",
                self.anchor
            )));
        };
        if day == 0 || day > length {
            return Err(CalendarError::InvalidInput(format!(
                "{month} has {length} days, got day {day}"
            )));
        }
        let offset = u64::from(before + day - 1);
        self.anchor
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| {
                CalendarError::InvalidInput(format!("date overflow after {}", self.anchor))
            })
    }
}

/// The lunisolar year anchored in Gregorian `anchor_year`.
pub fn lunisolar_year_of<L: AnchorLocator + ?Sized>(
    locator: &L,
    anchor_year: i32,
) -> Result<LunisolarYear, CalendarError> {
    Ok(LunisolarYear::new(locator.anchor_for_year(anchor_year)?))
}

/// The lunisolar year whose anchor is the latest one on or before `date`.
pub fn lunisolar_year_containing<L: AnchorLocator + ?Sized>(
    locator: &L,
    date: NaiveDate,
) -> Result<LunisolarYear, CalendarError> {
    let mut anchor = locator.anchor_for_year(date.year())?;
    if date < anchor {
        anchor = locator.anchor_for_year(date.year() - 1)?;
    }
    if date < anchor {
        return Err(CalendarError::AnchoringInconsistency {
            date,
            anchor,
            delta_days: (date - anchor).num_days(),
            year_days: cycle_year(anchor.year()).total_days(),
        });
    }
    tracing::debug!(%date, %anchor, "resolved lunisolar year");
    Ok(LunisolarYear::new(anchor))
}

/// Convert a Gregorian date to its Celtic month and day.
pub fn to_celtic_date<L: AnchorLocator + ?Sized>(
    locator: &L,
    date: NaiveDate,
    policy: OverflowPolicy,
) -> Result<CelticDate, CalendarError> {
    let year = lunisolar_year_containing(locator, date)?;
    let delta_days = (date - year.anchor).num_days();
    if let Some(celtic) = year.celtic_date_at(delta_days) {
        return Ok(celtic);
    }
    let year_days = year.cycle.total_days();
    match policy {
        OverflowPolicy::Fail => Err(CalendarError::AnchoringInconsistency {
            date,
            anchor: year.anchor,
            delta_days,
            year_days,
        }),
        OverflowPolicy::FirstMonth => {
            tracing::warn!(
                %date,
                anchor = %year.anchor,
                delta_days,
                year_days,
                "day offset past the last month, falling back to Samonios 1"
            );
            Ok(CelticDate {
                month: CelticMonth::Samonios,
                day: 1,
                overflowed: true,
            })
        }
    }
}

/// Gregorian date of a Celtic date in the year anchored in `anchor_year`.
pub fn from_celtic_date<L: AnchorLocator + ?Sized>(
    locator: &L,
    anchor_year: i32,
    celtic: CelticDate,
) -> Result<NaiveDate, CalendarError> {
    lunisolar_year_of(locator, anchor_year)?.date_of(celtic.month, celtic.day)
}
