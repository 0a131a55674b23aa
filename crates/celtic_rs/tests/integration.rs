//! Almanac behavior over deterministic fake sources.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use celtic_astro::AstroError;
use celtic_calendar::CalendarError;
use celtic_rs::*;
use chrono::NaiveDateTime;

/// 29-day synthetic moon: new on the epoch, full 14 days later.
struct FakeMoon {
    epoch: NaiveDate,
    calls: AtomicUsize,
}

impl FakeMoon {
    fn new() -> Self {
        Self {
            epoch: date(2025, 1, 29),
            calls: AtomicUsize::new(0),
        }
    }
}

impl IlluminationSource for FakeMoon {
    fn reading(&self, d: NaiveDate) -> Result<LunarReading, DataSourceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let k = (d - self.epoch).num_days().rem_euclid(29);
        let pct = if k <= 14 {
            k as f64 * 100.0 / 14.0
        } else {
            (29 - k) as f64 * 100.0 / 15.0
        };
        Ok(LunarReading::new(pct, k < 14))
    }
}

struct BrokenMoon;

impl IlluminationSource for BrokenMoon {
    fn reading(&self, _d: NaiveDate) -> Result<LunarReading, DataSourceError> {
        Ok(LunarReading::new(150.0, true))
    }
}

struct FixedSeasons;

impl SeasonalEventSource for FixedSeasons {
    fn seasonal_events(&self, year: i32) -> Result<Vec<SeasonalInstant>, DataSourceError> {
        if year != 2025 {
            return Err(DataSourceError::OutOfRange { year });
        }
        let at = |m, d| NaiveDateTime::new(date(2025, m, d), chrono::NaiveTime::MIN);
        Ok(vec![
            SeasonalInstant { event: SeasonalEvent::SpringEquinox, at: at(3, 20) },
            SeasonalInstant { event: SeasonalEvent::SummerSolstice, at: at(6, 21) },
            SeasonalInstant { event: SeasonalEvent::FallEquinox, at: at(9, 22) },
            SeasonalInstant { event: SeasonalEvent::WinterSolstice, at: at(12, 21) },
        ])
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn almanac_with(config: AlmanacConfig) -> (Almanac, Arc<FakeMoon>) {
    let moon = Arc::new(FakeMoon::new());
    let almanac = Almanac::with_sources(config, moon.clone(), Arc::new(FixedSeasons)).unwrap();
    (almanac, moon)
}

fn almanac() -> Almanac {
    almanac_with(AlmanacConfig::default()).0
}

#[test]
fn anchors_from_fake_moon() {
    let a = almanac();
    assert_eq!(a.first_new_moon_of_year(2024).unwrap(), date(2024, 1, 18));
    assert_eq!(a.first_new_moon_of_year(2025).unwrap(), date(2025, 1, 29));
    assert_eq!(a.first_new_moon_of_year(2026).unwrap(), date(2026, 1, 12));
    assert_eq!(a.first_new_moon_of_year(2027).unwrap(), date(2027, 1, 24));
}

#[test]
fn anchors_are_memoized() {
    let (a, moon) = almanac_with(AlmanacConfig::default());
    a.first_new_moon_of_year(2025).unwrap();
    let after_first = moon.calls.load(Ordering::Relaxed);
    a.first_new_moon_of_year(2025).unwrap();
    assert_eq!(moon.calls.load(Ordering::Relaxed), after_first);

    a.clear_anchor_cache();
    a.first_new_moon_of_year(2025).unwrap();
    assert_eq!(moon.calls.load(Ordering::Relaxed), 2 * after_first);
}

#[test]
fn memoization_can_be_disabled() {
    let mut config = AlmanacConfig::default();
    config.calendar.cache_anchors = false;
    let (a, moon) = almanac_with(config);
    a.first_new_moon_of_year(2025).unwrap();
    let after_first = moon.calls.load(Ordering::Relaxed);
    a.first_new_moon_of_year(2025).unwrap();
    assert_eq!(moon.calls.load(Ordering::Relaxed), 2 * after_first);
}

#[test]
fn month_lengths_follow_cycle() {
    let a = almanac();
    assert_eq!(a.month_lengths(2025).len(), 12);
    assert_eq!(a.month_lengths(2027).len(), 13);
    assert_eq!(a.cycle_year(2029).total_days(), 384);
}

#[test]
fn imbolc_day() {
    let a = almanac();
    let d = date(2025, 2, 9);
    assert_eq!(a.to_celtic_date(d).unwrap(), CelticDate::new(CelticMonth::Samonios, 12));
    assert_eq!(a.festival_today(d).unwrap().unwrap().festival.name, "Imbolc");
    assert_eq!(a.from_celtic_date(2025, CelticDate::new(CelticMonth::Samonios, 12)).unwrap(), d);
}

#[test]
fn phases_and_luck() {
    let a = almanac();
    // 11 days after new: 78.6 %, waxing.
    let d = date(2025, 2, 9);
    assert_eq!(a.lunar_phase(d).unwrap(), LunarPhase::WaningCrescent);
    assert_eq!(a.display_phase(d).unwrap(), LunarPhase::FullMoon);
    // Even day, coarse waning bucket.
    assert_eq!(a.luck(d).unwrap(), LuckCategory::Neutral);
    // Anchor day: 0 %, Samonios 1 is odd.
    assert_eq!(a.lunar_phase(date(2025, 1, 29)).unwrap(), LunarPhase::NewMoon);
    assert_eq!(a.luck(date(2025, 1, 29)).unwrap(), LuckCategory::Lucky);
}

#[test]
fn day_report_navigates_and_summarizes() {
    let a = almanac();
    let report = a.day_report(date(2025, 2, 8), 1).unwrap();
    assert_eq!(report.date, date(2025, 2, 9));
    assert_eq!(report.celtic, CelticDate::new(CelticMonth::Samonios, 12));
    assert_eq!(report.phase, LunarPhase::WaningCrescent);
    assert_eq!(report.display_phase(), Some(LunarPhase::FullMoon));

    let dates: Vec<NaiveDate> = report.forecast.iter().map(|f| f.date).collect();
    assert_eq!(dates, vec![date(2025, 2, 9), date(2025, 2, 10), date(2025, 2, 11), date(2025, 2, 12)]);
    assert_eq!(report.forecast[3].phase, LunarPhase::WaningGibbous);

    assert_eq!(report.luck_today.luck, LuckCategory::Neutral);
    assert_eq!(report.luck_tomorrow.celtic.day, 13);
    assert_eq!(report.luck_tomorrow.luck, LuckCategory::Unlucky);

    assert_eq!(report.festival_today.unwrap().festival.name, "Imbolc");
    // Spring Equinox is 47 days out, past the default horizon.
    assert_eq!(report.next_festival, None);

    let seasons = report.seasonal_events.unwrap();
    assert_eq!(seasons.len(), 4);
    assert_eq!(seasons[0].instant.event, SeasonalEvent::SpringEquinox);
    assert_eq!(seasons[0].days_away, 39);
}

#[test]
fn horizon_is_configurable() {
    let mut config = AlmanacConfig::default();
    config.festivals.horizon_days = 60;
    let (a, _) = almanac_with(config);
    let report = a.day_report(date(2025, 2, 9), 0).unwrap();
    let next = report.next_festival.unwrap();
    assert_eq!(next.occurrence.festival.name, "Spring Equinox");
    assert_eq!(next.occurrence.date, date(2025, 3, 28));
    assert_eq!(next.days_away, 47);
}

#[test]
fn past_seasonal_events_are_dropped() {
    let a = almanac();
    let report = a.day_report(date(2025, 6, 21), 0).unwrap();
    let events: Vec<(SeasonalEvent, i64)> = report
        .seasonal_events
        .unwrap()
        .iter()
        .map(|c| (c.instant.event, c.days_away))
        .collect();
    assert_eq!(
        events,
        vec![
            (SeasonalEvent::SummerSolstice, 0),
            (SeasonalEvent::FallEquinox, 93),
            (SeasonalEvent::WinterSolstice, 183),
        ]
    );
}

#[test]
fn festivals_for_year_in_order() {
    let a = almanac();
    let year = a.festivals_for_year(2025).unwrap();
    assert_eq!(year.len(), 8);
    assert!(year.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(year[0].festival.name, "Imbolc");
    assert_eq!(year[7].festival.name, "Winter Solstice");
    assert_eq!(year[7].date, date(2025, 12, 29));
}

#[test]
fn next_festival_crosses_year_end() {
    let a = almanac();
    // 2025-12-30 is after the last festival of the 2025 year.
    let next = a.next_festival(date(2025, 12, 30)).unwrap().unwrap();
    assert_eq!(next.occurrence.festival.name, "Imbolc");
    assert_eq!(next.occurrence.anchor_year, 2026);
    assert_eq!(next.occurrence.date, date(2026, 1, 23));
    assert_eq!(next.days_away, 24);
}

#[test]
fn overflow_fails_by_default() {
    // 2026 is a 354-day year ending 2027-01-01; 2027's anchor is 01-24.
    let err = almanac().to_celtic_date(date(2027, 1, 5)).unwrap_err();
    assert!(matches!(
        err,
        AlmanacError::Calendar(CalendarError::AnchoringInconsistency { delta_days: 358, year_days: 354, .. })
    ));
}

#[test]
fn overflow_fallback_when_configured() {
    let mut config = AlmanacConfig::default();
    config.calendar.overflow_policy = OverflowPolicy::FirstMonth;
    let (a, _) = almanac_with(config);
    let c = a.to_celtic_date(date(2027, 1, 5)).unwrap();
    assert_eq!((c.month, c.day, c.overflowed), (CelticMonth::Samonios, 1, true));
}

#[test]
fn invalid_source_data_is_reported() {
    let a = Almanac::with_sources(AlmanacConfig::default(), Arc::new(BrokenMoon), Arc::new(FixedSeasons))
        .unwrap();
    let err = a.lunar_phase(date(2025, 3, 1)).unwrap_err();
    assert!(matches!(
        err,
        AlmanacError::Astro(AstroError::DataSource(DataSourceError::InvalidData { .. }))
    ));
}

#[test]
fn seasonal_source_failure_keeps_rest_of_report() {
    let a = almanac();
    let report = a.day_report(date(2024, 6, 1), 0).unwrap();
    assert_eq!(report.seasonal_events, Err(DataSourceError::OutOfRange { year: 2024 }));
    // 2024-01-18 + 135 days, past 118 days of four months: Ogronios 18.
    assert_eq!(report.celtic, CelticDate::new(CelticMonth::Ogronios, 18));
    assert_eq!(report.forecast.len(), 4);
    assert_eq!(report.luck_tomorrow.date, date(2024, 6, 2));
}

#[test]
fn seasonal_events_query_still_reports_errors() {
    let err = almanac().seasonal_events(2024).unwrap_err();
    assert!(matches!(
        err,
        AlmanacError::Astro(AstroError::DataSource(DataSourceError::OutOfRange { year: 2024 }))
    ));
}

#[test]
fn builtin_report_past_mean_seasons_range() {
    let report = Almanac::with_defaults().day_report(date(3001, 6, 10), 0).unwrap();
    assert_eq!(report.date, date(3001, 6, 10));
    assert!(!report.celtic.overflowed);
    assert_eq!(report.seasonal_events, Err(DataSourceError::OutOfRange { year: 3001 }));
}

#[test]
fn invalid_config_rejected() {
    let mut config = AlmanacConfig::default();
    config.new_moon.max_search_days = 0;
    let err = Almanac::with_sources(config, Arc::new(FakeMoon::new()), Arc::new(FixedSeasons)).unwrap_err();
    assert!(matches!(err, AlmanacError::Config(ConfigError::Invalid(_))));
}

#[test]
fn navigation_out_of_range() {
    assert_eq!(Almanac::navigate(date(2025, 2, 9), -9).unwrap(), date(2025, 1, 31));
    assert!(matches!(
        Almanac::navigate(NaiveDate::MAX, 1),
        Err(AlmanacError::DateOutOfRange { offset: 1, .. })
    ));
}

#[test]
fn builtin_models() {
    let a = Almanac::with_defaults();
    assert_eq!(a.first_new_moon_of_year(2024).unwrap(), date(2024, 1, 11));
    let report = a.day_report(date(2024, 3, 1), 0).unwrap();
    assert_eq!(report.forecast.len(), 4);
    assert!(report.seasonal_events.unwrap().len() <= 4);
    assert!(!report.celtic.overflowed);
}
