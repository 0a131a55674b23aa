//! Festivals and their Gregorian dates.
//!
//! A festival is a fixed (month, day) of the Celtic calendar. Its
//! Gregorian date in a given lunisolar year is the anchor plus the days of
//! every preceding month plus `day - 1`. Queries resolve the table over the
//! query date's lunisolar year and its neighbours on both sides, so
//! "next festival" keeps working across the year boundary.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorLocator;
use crate::convert::{LunisolarYear, lunisolar_year_containing, lunisolar_year_of};
use crate::error::CalendarError;
use crate::month::CelticMonth;

/// Longest possible month.
const MAX_MONTH_DAYS: u32 = 30;

/// A festival on a fixed Celtic month and day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Festival {
    pub month: CelticMonth,
    pub day: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Festival {
    pub fn new(month: CelticMonth, day: u32, name: &str, description: &str) -> Self {
        Self {
            month,
            day,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Name with the description in parentheses, when there is one.
    pub fn display_name(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.description)
        }
    }
}

/// The built-in festival table.
pub fn default_festivals() -> Vec<Festival> {
    use CelticMonth::*;
    vec![
        Festival::new(Samonios, 12, "Imbolc", "Festival of Lights"),
        Festival::new(Dumannios, 29, "Spring Equinox", "Balance between light and dark"),
        Festival::new(Anagantios, 12, "Beltane", "Festival of Fire"),
        Festival::new(Cutios, 3, "Summer Solstice", "Celebration of abundance"),
        Festival::new(Giamonios, 16, "Lughnasadh", "Harvest Festival"),
        Festival::new(Equos, 9, "Autumn Equinox", "Transition into reflection"),
        Festival::new(
            Elembivos,
            19,
            "Samhain",
            "Festival of the Dead, Arawn's peak influence",
        ),
        Festival::new(
            Cantlos,
            10,
            "Winter Solstice",
            "Arawn's realm is at its most mysterious",
        ),
    ]
}

/// A festival resolved to a Gregorian date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalOccurrence {
    pub festival: Festival,
    pub date: NaiveDate,
    /// Gregorian year of the lunisolar anchor the date was resolved in.
    pub anchor_year: i32,
}

/// The nearest festival strictly after a query date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingFestival {
    pub occurrence: FestivalOccurrence,
    /// Always > 0.
    pub days_away: i64,
}

/// A validated festival table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalTable {
    entries: Vec<Festival>,
}

impl Default for FestivalTable {
    fn default() -> Self {
        Self {
            entries: default_festivals(),
        }
    }
}

impl FestivalTable {
    /// Build a table, rejecting impossible days and duplicate (month, day) keys.
    pub fn new(entries: Vec<Festival>) -> Result<Self, CalendarError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for f in &entries {
            if f.day == 0 || f.day > MAX_MONTH_DAYS {
                return Err(CalendarError::InvalidInput(format!(
                    "festival {} on day {} of {}: day must be 1..={MAX_MONTH_DAYS}",
                    f.name, f.day, f.month
                )));
            }
            if f.name.trim().is_empty() {
                return Err(CalendarError::InvalidInput(format!(
                    "festival on {} {} has an empty name",
                    f.month, f.day
                )));
            }
            if !seen.insert((f.month, f.day)) {
                return Err(CalendarError::InvalidInput(format!(
                    "two festivals on {} {}",
                    f.month, f.day
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Festival] {
        &self.entries
    }

    /// Gregorian dates of every festival in one lunisolar year, in date order.
    ///
    /// Entries whose month or day does not exist in this year (Sonnocingos
    /// outside intercalary years, day 30 of a 29-day month) are skipped.
    pub fn resolve(&self, year: &LunisolarYear) -> Vec<FestivalOccurrence> {
        let mut out: Vec<FestivalOccurrence> = self
            .entries
            .iter()
            .filter_map(|f| match year.date_of(f.month, f.day) {
                Ok(date) => Some(FestivalOccurrence {
                    festival: f.clone(),
                    date,
                    anchor_year: year.anchor_year(),
                }),
                Err(e) => {
                    tracing::debug!(
                        festival = %f.name,
                        anchor = %year.anchor,
                        error = %e,
                        "festival skipped"
                    );
                    None
                }
            })
            .collect();
        out.sort_by_key(|o| o.date);
        out
    }

    /// Resolve over the lunisolar year of `date` and the years on either side.
    ///
    /// Occurrences of the previous and current year that land on or after
    /// the following anchor are dropped; those days belong to the next year.
    pub fn resolve_around<L: AnchorLocator + ?Sized>(
        &self,
        locator: &L,
        date: NaiveDate,
    ) -> Result<Vec<FestivalOccurrence>, CalendarError> {
        let current = lunisolar_year_containing(locator, date)?;
        let y = current.anchor_year();
        let previous = lunisolar_year_of(locator, y - 1)?;
        let next = lunisolar_year_of(locator, y + 1)?;
        let mut out = self.resolve_before(&previous, current.anchor);
        out.extend(self.resolve_before(&current, next.anchor));
        out.extend(self.resolve(&next));
        Ok(out)
    }

    fn resolve_before(&self, year: &LunisolarYear, cutoff: NaiveDate) -> Vec<FestivalOccurrence> {
        let mut out = self.resolve(year);
        out.retain(|o| {
            let keep = o.date < cutoff;
            if !keep {
                tracing::debug!(
                    festival = %o.festival.name,
                    date = %o.date,
                    %cutoff,
                    "festival falls in the following year"
                );
            }
            keep
        });
        out
    }

    /// Festival falling exactly on `date`, if any.
    pub fn festival_on<L: AnchorLocator + ?Sized>(
        &self,
        locator: &L,
        date: NaiveDate,
    ) -> Result<Option<FestivalOccurrence>, CalendarError> {
        Ok(self
            .resolve_around(locator, date)?
            .into_iter()
            .find(|o| o.date == date))
    }

    /// Earliest festival strictly after `date`.
    pub fn next_after<L: AnchorLocator + ?Sized>(
        &self,
        locator: &L,
        date: NaiveDate,
    ) -> Result<Option<UpcomingFestival>, CalendarError> {
        let mut best: Option<FestivalOccurrence> = None;
        for occurrence in self.resolve_around(locator, date)? {
            if occurrence.date <= date {
                continue;
            }
            if best.as_ref().is_none_or(|b| occurrence.date < b.date) {
                best = Some(occurrence);
            }
        }
        Ok(best.map(|occurrence| UpcomingFestival {
            days_away: (occurrence.date - date).num_days(),
            occurrence,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::LunisolarYear;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_table_is_valid() {
        assert!(FestivalTable::new(default_festivals()).is_ok());
        assert_eq!(FestivalTable::default().entries().len(), 8);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let entries = vec![
            Festival::new(CelticMonth::Equos, 9, "A", ""),
            Festival::new(CelticMonth::Equos, 9, "B", ""),
        ];
        assert!(matches!(
            FestivalTable::new(entries),
            Err(CalendarError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_bad_day() {
        for day in [0, 31] {
            let entries = vec![Festival::new(CelticMonth::Riuros, day, "X", "")];
            assert!(FestivalTable::new(entries).is_err());
        }
    }

    #[test]
    fn imbolc_is_anchor_plus_eleven() {
        let year = LunisolarYear::new(date(2025, 1, 29));
        let resolved = FestivalTable::default().resolve(&year);
        let imbolc = resolved.iter().find(|o| o.festival.name == "Imbolc").unwrap();
        assert_eq!(imbolc.date, date(2025, 2, 9));
        assert_eq!(imbolc.anchor_year, 2025);
    }

    #[test]
    fn resolved_in_date_order() {
        let year = LunisolarYear::new(date(2025, 1, 29));
        let resolved = FestivalTable::default().resolve(&year);
        assert_eq!(resolved.len(), 8);
        for w in resolved.windows(2) {
            assert!(w[0].date < w[1].date);
        }
        assert_eq!(resolved.last().unwrap().date, date(2025, 12, 29));
    }

    #[test]
    fn intercalary_festival_only_in_long_years() {
        let table = FestivalTable::new(vec![Festival::new(
            CelticMonth::Sonnocingos,
            5,
            "Leap Feast",
            "",
        )])
        .unwrap();
        assert!(table.resolve(&LunisolarYear::new(date(2025, 1, 29))).is_empty());
        let long = table.resolve(&LunisolarYear::new(date(2027, 1, 8)));
        assert_eq!(long.len(), 1);
    }

    #[test]
    fn display_name() {
        let f = Festival::new(
            CelticMonth::Cutios,
            3,
            "Summer Solstice",
            "Celebration of abundance",
        );
        assert_eq!(f.display_name(), "Summer Solstice (Celebration of abundance)");
        assert_eq!(Festival::new(CelticMonth::Cutios, 3, "Plain", "").display_name(), "Plain");
    }
}
