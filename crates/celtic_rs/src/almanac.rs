//! The [`Almanac`] facade and its anchor memo.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use celtic_astro::{
    IlluminationSource, LunarPhase, LunarReading, MeanLunarModel, MeanSeasons, NewMoonConfig,
    SeasonalEventSource, SeasonalInstant, checked_reading, classify_coarse, classify_fine,
    first_new_moon_of_year,
};
use celtic_calendar::{
    AnchorLocator, CalendarError, CelticDate, CycleYear, FestivalOccurrence, FestivalTable,
    LuckCategory, LunisolarYear, UpcomingFestival, cycle_year, evaluate_luck, from_celtic_date,
    lunisolar_year_containing, lunisolar_year_of, to_celtic_date,
};
use celtic_config::AlmanacConfig;
use chrono::NaiveDate;

use crate::error::AlmanacError;

/// Celtic calendar almanac.
///
/// Owns the illumination and seasonal sources, the festival table and a
/// per-year memo of lunisolar anchors. `Almanac` is [`Send`] + [`Sync`];
/// share it through `Arc<Almanac>`.
///
/// ```rust,ignore
/// let almanac = Almanac::with_defaults();
/// let today = chrono::Local::now().date_naive();
/// println!("{}", almanac.to_celtic_date(today)?);
/// ```
pub struct Almanac {
    config: AlmanacConfig,
    new_moon: NewMoonConfig,
    festivals: FestivalTable,
    illumination: Arc<dyn IlluminationSource>,
    seasons: Arc<dyn SeasonalEventSource>,
    anchors: Mutex<HashMap<i32, NaiveDate>>,
}

// Sources are trait objects without Debug.
impl Debug for Almanac {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Almanac")
            .field("config", &self.config)
            .field("cached_anchors", &self.anchor_cache().len())
            .finish()
    }
}

impl Almanac {
    /// Almanac over the built-in mean lunar and seasonal models.
    pub fn new(config: AlmanacConfig) -> Result<Self, AlmanacError> {
        Self::with_sources(config, Arc::new(MeanLunarModel), Arc::new(MeanSeasons))
    }

    /// Default configuration over the built-in models.
    pub fn with_defaults() -> Self {
        Self::from_parts(
            AlmanacConfig::default(),
            NewMoonConfig::default(),
            FestivalTable::default(),
            Arc::new(MeanLunarModel),
            Arc::new(MeanSeasons),
        )
    }

    /// Almanac over caller-supplied data sources.
    pub fn with_sources(
        config: AlmanacConfig,
        illumination: Arc<dyn IlluminationSource>,
        seasons: Arc<dyn SeasonalEventSource>,
    ) -> Result<Self, AlmanacError> {
        config.validate()?;
        let new_moon = config.new_moon_config()?;
        let festivals = config.festival_table()?;
        Ok(Self::from_parts(config, new_moon, festivals, illumination, seasons))
    }

    fn from_parts(
        config: AlmanacConfig,
        new_moon: NewMoonConfig,
        festivals: FestivalTable,
        illumination: Arc<dyn IlluminationSource>,
        seasons: Arc<dyn SeasonalEventSource>,
    ) -> Self {
        Self {
            config,
            new_moon,
            festivals,
            illumination,
            seasons,
            anchors: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &AlmanacConfig {
        &self.config
    }

    pub fn festival_table(&self) -> &FestivalTable {
        &self.festivals
    }

    // Entries are inserted whole; a poisoned map is still consistent.
    fn anchor_cache(&self) -> MutexGuard<'_, HashMap<i32, NaiveDate>> {
        self.anchors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop memoized anchors.
    pub fn clear_anchor_cache(&self) {
        self.anchor_cache().clear();
    }

    /// First new moon on or after January 1 of `year`.
    pub fn first_new_moon_of_year(&self, year: i32) -> Result<NaiveDate, AlmanacError> {
        Ok(self.anchor_for_year(year)?)
    }

    /// Month structure of the lunisolar year anchored in `year`.
    pub fn cycle_year(&self, year: i32) -> CycleYear {
        cycle_year(year)
    }

    /// Month lengths of the lunisolar year anchored in `year`.
    pub fn month_lengths(&self, year: i32) -> &'static [u32] {
        self.cycle_year(year).month_lengths
    }

    /// The lunisolar year containing `date`.
    pub fn lunisolar_year(&self, date: NaiveDate) -> Result<LunisolarYear, AlmanacError> {
        Ok(lunisolar_year_containing(self, date)?)
    }

    pub fn to_celtic_date(&self, date: NaiveDate) -> Result<CelticDate, AlmanacError> {
        Ok(to_celtic_date(self, date, self.config.calendar.overflow_policy)?)
    }

    /// Gregorian date of `celtic` in the lunisolar year anchored in `anchor_year`.
    pub fn from_celtic_date(
        &self,
        anchor_year: i32,
        celtic: CelticDate,
    ) -> Result<NaiveDate, AlmanacError> {
        Ok(from_celtic_date(self, anchor_year, celtic)?)
    }

    /// Validated illumination reading for `date`.
    pub fn lunar_reading(&self, date: NaiveDate) -> Result<LunarReading, AlmanacError> {
        Ok(checked_reading(self.illumination.as_ref(), date)?)
    }

    /// Coarse 4-bucket phase, as used for luck.
    pub fn lunar_phase(&self, date: NaiveDate) -> Result<LunarPhase, AlmanacError> {
        let reading = self.lunar_reading(date)?;
        Ok(classify_coarse(reading.illumination_percent).phase)
    }

    /// Fine 8-bucket phase for display.
    pub fn display_phase(&self, date: NaiveDate) -> Result<LunarPhase, AlmanacError> {
        let reading = self.lunar_reading(date)?;
        Ok(classify_fine(reading.synodic_position()).phase)
    }

    pub fn luck(&self, date: NaiveDate) -> Result<LuckCategory, AlmanacError> {
        let celtic = self.to_celtic_date(date)?;
        let phase = self.lunar_phase(date)?;
        Ok(evaluate_luck(celtic.day, phase))
    }

    /// Festival falling on `date`, if any.
    pub fn festival_today(
        &self,
        date: NaiveDate,
    ) -> Result<Option<FestivalOccurrence>, AlmanacError> {
        Ok(self.festivals.festival_on(self, date)?)
    }

    /// Earliest festival strictly after `date`, with no horizon applied.
    pub fn next_festival(&self, date: NaiveDate) -> Result<Option<UpcomingFestival>, AlmanacError> {
        Ok(self.festivals.next_after(self, date)?)
    }

    /// Every festival of the lunisolar year anchored in `anchor_year`, in date order.
    pub fn festivals_for_year(
        &self,
        anchor_year: i32,
    ) -> Result<Vec<FestivalOccurrence>, AlmanacError> {
        let year = lunisolar_year_of(self, anchor_year)?;
        Ok(self.festivals.resolve(&year))
    }

    /// Equinoxes and solstices of Gregorian `year`.
    pub fn seasonal_events(&self, year: i32) -> Result<Vec<SeasonalInstant>, AlmanacError> {
        Ok(self.seasons.seasonal_events(year)?)
    }

    pub(crate) fn seasonal_source(&self) -> &dyn SeasonalEventSource {
        self.seasons.as_ref()
    }

    /// `base` moved by `offset` days.
    pub fn navigate(base: NaiveDate, offset: i64) -> Result<NaiveDate, AlmanacError> {
        chrono::TimeDelta::try_days(offset)
            .and_then(|delta| base.checked_add_signed(delta))
            .ok_or(AlmanacError::DateOutOfRange { base, offset })
    }
}

impl AnchorLocator for Almanac {
    fn anchor_for_year(&self, year: i32) -> Result<NaiveDate, CalendarError> {
        let cache = self.config.calendar.cache_anchors;
        if cache {
            if let Some(&anchor) = self.anchor_cache().get(&year) {
                return Ok(anchor);
            }
        }
        let anchor = first_new_moon_of_year(self.illumination.as_ref(), year, &self.new_moon)?;
        tracing::debug!(year, %anchor, "located lunisolar anchor");
        if cache {
            self.anchor_cache().insert(year, anchor);
        }
        Ok(anchor)
    }
}
