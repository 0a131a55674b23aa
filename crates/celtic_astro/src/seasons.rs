//! Equinoxes and solstices.
//!
//! [`SeasonalEventSource`] is the port for precise solstice/equinox
//! instants. [`MeanSeasons`] is a built-in source: mean instants from
//! Meeus (ch. 27, table 27.B, valid 1000..=3000) corrected by the 24
//! periodic terms of table 27.C. Accuracy is within a few minutes, which
//! is plenty at whole-day resolution.

use chrono::NaiveDateTime;

use crate::error::DataSourceError;
use crate::julian::{J2000_JD, jd_to_datetime};

/// The four cardinal solar events of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeasonalEvent {
    SpringEquinox,
    SummerSolstice,
    FallEquinox,
    WinterSolstice,
}

/// All four events in calendar order.
pub const ALL_SEASONAL_EVENTS: [SeasonalEvent; 4] = [
    SeasonalEvent::SpringEquinox,
    SeasonalEvent::SummerSolstice,
    SeasonalEvent::FallEquinox,
    SeasonalEvent::WinterSolstice,
];

impl SeasonalEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpringEquinox => "Spring Equinox",
            Self::SummerSolstice => "Summer Solstice",
            Self::FallEquinox => "Fall Equinox",
            Self::WinterSolstice => "Winter Solstice",
        }
    }
}

impl std::fmt::Display for SeasonalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A seasonal event and its instant (UTC, to the second).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalInstant {
    pub event: SeasonalEvent,
    pub at: NaiveDateTime,
}

/// Source of equinox and solstice instants.
pub trait SeasonalEventSource: Send + Sync {
    /// All events falling in the Gregorian `year`, in chronological order.
    fn seasonal_events(&self, year: i32) -> Result<Vec<SeasonalInstant>, DataSourceError>;
}

impl<T: SeasonalEventSource + ?Sized> SeasonalEventSource for std::sync::Arc<T> {
    fn seasonal_events(&self, year: i32) -> Result<Vec<SeasonalInstant>, DataSourceError> {
        (**self).seasonal_events(year)
    }
}

/// Built-in mean-element equinox/solstice source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanSeasons;

/// First and last years covered by table 27.B.
pub const MEAN_SEASONS_YEARS: (i32, i32) = (1000, 3000);

// Table 27.B: JDE0 polynomial in Y = (year - 2000) / 1000.
const MEAN_TERMS: [[f64; 5]; 4] = [
    [2_451_623.809_84, 365_242.374_04, 0.051_69, -0.004_11, -0.000_57],
    [2_451_716.567_67, 365_241.626_03, 0.003_25, 0.008_88, -0.000_30],
    [2_451_810.217_15, 365_242.017_67, -0.115_75, 0.003_37, 0.000_78],
    [2_451_900.059_52, 365_242.740_49, -0.062_23, -0.008_23, 0.000_32],
];

// Table 27.C: (A, B deg, C deg/century).
#[rustfmt::skip]
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1934.136), (203.0, 337.23, 32964.467),
    (199.0, 342.08, 20.186),   (182.0, 27.85, 445267.112),
    (156.0, 73.14, 45036.886), (136.0, 171.52, 22518.443),
    (77.0, 222.54, 65928.934), (74.0, 296.72, 3034.906),
    (70.0, 243.58, 9037.513),  (58.0, 119.81, 33718.147),
    (52.0, 297.17, 150.678),   (50.0, 21.02, 2281.226),
    (45.0, 247.54, 29929.562), (44.0, 325.15, 31555.956),
    (29.0, 60.93, 4443.417),   (18.0, 155.12, 67555.328),
    (17.0, 288.79, 4562.452),  (16.0, 198.04, 62894.029),
    (14.0, 199.76, 31436.921), (12.0, 95.39, 14577.848),
    (12.0, 287.11, 31931.756), (12.0, 320.81, 34777.259),
    (9.0, 227.73, 1222.114),   (8.0, 15.45, 16859.074),
];

impl MeanSeasons {
    /// Julian Ephemeris Day of an event in `year`.
    pub fn event_jde(year: i32, event: SeasonalEvent) -> f64 {
        let y = (f64::from(year) - 2000.0) / 1000.0;
        let c = MEAN_TERMS[event as usize];
        let jde0 = c[0] + y * (c[1] + y * (c[2] + y * (c[3] + y * c[4])));

        let t = (jde0 - J2000_JD) / 36_525.0;
        let w = (35_999.373 * t - 2.47).to_radians();
        let delta_lambda = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
        let s: f64 = PERIODIC_TERMS
            .iter()
            .map(|&(a, b, c)| a * (b + c * t).to_radians().cos())
            .sum();
        jde0 + 0.000_01 * s / delta_lambda
    }
}

impl SeasonalEventSource for MeanSeasons {
    fn seasonal_events(&self, year: i32) -> Result<Vec<SeasonalInstant>, DataSourceError> {
        if year < MEAN_SEASONS_YEARS.0 || year > MEAN_SEASONS_YEARS.1 {
            return Err(DataSourceError::OutOfRange { year });
        }
        ALL_SEASONAL_EVENTS
            .iter()
            .map(|&event| {
                let at = jd_to_datetime(Self::event_jde(year, event)).ok_or_else(|| {
                    DataSourceError::Unavailable(format!("{event} {year} not representable"))
                })?;
                Ok(SeasonalInstant { event, at })
            })
            .collect()
    }
}
