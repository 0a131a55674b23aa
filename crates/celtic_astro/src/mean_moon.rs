//! Built-in low-precision lunar illumination model.
//!
//! Phase angle from the mean elongation of the Moon and the mean anomalies
//! of the Sun and Moon, with the six largest periodic terms (Meeus,
//! *Astronomical Algorithms*, ch. 48). Accuracy is a fraction of a degree
//! in phase angle, i.e. well under 1% illumination near new moon.

use chrono::NaiveDate;

use crate::error::DataSourceError;
use crate::illumination::{IlluminationSource, LunarReading};
use crate::julian::{jd_from_date, jd_to_centuries};

/// Mean-element illumination source. Stateless and deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanLunarModel;

impl MeanLunarModel {
    pub fn new() -> Self {
        Self
    }

    /// Mean elongation D of the Moon, degrees in [0, 360).
    pub fn mean_elongation_deg(t: f64) -> f64 {
        (297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t * t).rem_euclid(360.0)
    }

    /// Phase angle i in degrees (0 = full, 180 = new).
    pub fn phase_angle_deg(t: f64) -> f64 {
        let d = Self::mean_elongation_deg(t);
        let m = (357.529_109_2 + 35_999.050_290_9 * t).rem_euclid(360.0);
        let mp = (134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t * t).rem_euclid(360.0);
        let (d_r, m_r, mp_r) = (d.to_radians(), m.to_radians(), mp.to_radians());
        let i = 180.0 - d - 6.289 * mp_r.sin() + 2.100 * m_r.sin()
            - 1.274 * (2.0 * d_r - mp_r).sin()
            - 0.658 * (2.0 * d_r).sin()
            - 0.214 * (2.0 * mp_r).sin()
            - 0.110 * d_r.sin();
        i.rem_euclid(360.0)
    }

    /// Reading at a Julian Date.
    pub fn reading_at_jd(jd: f64) -> LunarReading {
        let t = jd_to_centuries(jd);
        let i = Self::phase_angle_deg(t).to_radians();
        let fraction = (1.0 + i.cos()) / 2.0;
        // Elongation below 180 deg: moon east of the sun, lit fraction growing.
        let waxing = Self::mean_elongation_deg(t) < 180.0;
        LunarReading::new((fraction * 100.0).clamp(0.0, 100.0), waxing)
    }
}

impl IlluminationSource for MeanLunarModel {
    fn reading(&self, date: NaiveDate) -> Result<LunarReading, DataSourceError> {
        Ok(Self::reading_at_jd(jd_from_date(date)))
    }
}
