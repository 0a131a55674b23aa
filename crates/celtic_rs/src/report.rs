//! One-day almanac summary.

use celtic_astro::{DataSourceError, LunarPhase, SeasonalInstant, classify_coarse, classify_fine};
use celtic_calendar::{
    CelticDate, FestivalOccurrence, LuckCategory, UpcomingFestival, evaluate_luck,
};
use chrono::{Datelike, NaiveDate};

use crate::almanac::Almanac;
use crate::error::AlmanacError;

/// Days of fine-phase forecast after the report date.
pub const FORECAST_DAYS: i64 = 3;

/// Fine phase of one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseForecast {
    pub date: NaiveDate,
    pub illumination_percent: f64,
    pub phase: LunarPhase,
}

/// Luck of one day, with the Celtic date it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuckForecast {
    pub date: NaiveDate,
    pub celtic: CelticDate,
    pub phase: LunarPhase,
    pub luck: LuckCategory,
}

/// A seasonal event not yet passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalCountdown {
    pub instant: SeasonalInstant,
    pub days_away: i64,
}

/// Everything shown for a single navigated date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub celtic: CelticDate,
    pub illumination_percent: f64,
    /// Coarse phase.
    pub phase: LunarPhase,
    /// The report date followed by the next [`FORECAST_DAYS`] days.
    pub forecast: Vec<PhaseForecast>,
    pub luck_today: LuckForecast,
    pub luck_tomorrow: LuckForecast,
    pub festival_today: Option<FestivalOccurrence>,
    /// Only set when closer than the configured horizon.
    pub next_festival: Option<UpcomingFestival>,
    /// Events of the report date's Gregorian year on or after it. A failing
    /// seasonal source leaves the rest of the report intact.
    pub seasonal_events: Result<Vec<SeasonalCountdown>, DataSourceError>,
}

impl DayReport {
    /// Fine phase of the report date itself.
    pub fn display_phase(&self) -> Option<LunarPhase> {
        self.forecast.first().map(|f| f.phase)
    }
}

impl Almanac {
    fn luck_forecast(&self, date: NaiveDate) -> Result<LuckForecast, AlmanacError> {
        let celtic = self.to_celtic_date(date)?;
        let phase = self.lunar_phase(date)?;
        Ok(LuckForecast {
            date,
            celtic,
            phase,
            luck: evaluate_luck(celtic.day, phase),
        })
    }

    fn phase_forecast(&self, date: NaiveDate) -> Result<PhaseForecast, AlmanacError> {
        let reading = self.lunar_reading(date)?;
        Ok(PhaseForecast {
            date,
            illumination_percent: reading.illumination_percent,
            phase: classify_fine(reading.synodic_position()).phase,
        })
    }

    fn seasonal_countdowns(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<SeasonalCountdown>, DataSourceError> {
        let events = self
            .seasonal_source()
            .seasonal_events(date.year())
            .inspect_err(|e| tracing::warn!(%date, error = %e, "seasonal events unavailable"))?;
        Ok(events
            .into_iter()
            .map(|instant| SeasonalCountdown {
                days_away: (instant.at.date() - date).num_days(),
                instant,
            })
            .filter(|c| c.days_away >= 0)
            .collect())
    }

    /// Summary of the date `offset` days from `base`.
    pub fn day_report(&self, base: NaiveDate, offset: i64) -> Result<DayReport, AlmanacError> {
        let date = Self::navigate(base, offset)?;
        let reading = self.lunar_reading(date)?;

        let forecast = (0..=FORECAST_DAYS)
            .map(|d| self.phase_forecast(Self::navigate(date, d)?))
            .collect::<Result<Vec<_>, _>>()?;

        let luck_today = self.luck_forecast(date)?;
        let luck_tomorrow = self.luck_forecast(Self::navigate(date, 1)?)?;

        let horizon = i64::from(self.config().festivals.horizon_days);
        let next_festival = self
            .next_festival(date)?
            .filter(|upcoming| upcoming.days_away < horizon);

        let seasonal_events = self.seasonal_countdowns(date);

        tracing::debug!(%date, celtic = %luck_today.celtic, "built day report");
        Ok(DayReport {
            date,
            celtic: luck_today.celtic,
            illumination_percent: reading.illumination_percent,
            phase: classify_coarse(reading.illumination_percent).phase,
            forecast,
            luck_today,
            luck_tomorrow,
            festival_today: self.festival_today(date)?,
            next_festival,
            seasonal_events,
        })
    }
}
