//! Lunar phase classification.
//!
//! Two granularities are kept apart on purpose:
//! - **Coarse** (4 buckets) over illumination percent `[0, 100]`, used for
//!   luck scoring: `[0,25)` New Moon, `[25,50)` Waxing Crescent,
//!   `[50,75)` Full Moon, `[75,100]` Waning Crescent.
//! - **Fine** (8 buckets) over the synodic scale `[0, 200]` (0/200 = new,
//!   100 = full), used for display, with boundaries at
//!   1, 25, 50, 75, 100, 125, 150.
//!
//! A value sitting exactly on a boundary belongs to the upper bucket.
//! The top of each domain falls in the final catch-all bucket.
//!
//! Out-of-domain input: `classify_*` clamp to the nearest boundary bucket
//! and report it in [`PhaseReading::clamped`]; `try_classify_*` reject.

use crate::error::AstroError;

/// Upper end of the coarse (illumination percent) domain.
pub const COARSE_SCALE_MAX: f64 = 100.0;

/// Upper end of the fine (synodic position) domain.
pub const FINE_SCALE_MAX: f64 = 200.0;

const COARSE_BOUNDARIES: [f64; 3] = [25.0, 50.0, 75.0];
const COARSE_PHASES: [LunarPhase; 4] = [
    LunarPhase::NewMoon,
    LunarPhase::WaxingCrescent,
    LunarPhase::FullMoon,
    LunarPhase::WaningCrescent,
];

const FINE_BOUNDARIES: [f64; 7] = [1.0, 25.0, 50.0, 75.0, 100.0, 125.0, 150.0];

/// Named lunar phase. The coarse classifier only produces four of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// All eight phases in synodic order.
pub const ALL_PHASES: [LunarPhase; 8] = [
    LunarPhase::NewMoon,
    LunarPhase::WaxingCrescent,
    LunarPhase::FirstQuarter,
    LunarPhase::WaxingGibbous,
    LunarPhase::FullMoon,
    LunarPhase::WaningGibbous,
    LunarPhase::LastQuarter,
    LunarPhase::WaningCrescent,
];

impl LunarPhase {
    /// Display name, e.g. "Waxing Crescent".
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Moon glyph for display.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::NewMoon => "🌑",
            Self::WaxingCrescent => "🌒",
            Self::FirstQuarter => "🌓",
            Self::WaxingGibbous => "🌔",
            Self::FullMoon => "🌕",
            Self::WaningGibbous => "🌖",
            Self::LastQuarter => "🌗",
            Self::WaningCrescent => "🌘",
        }
    }

    /// Crescent or gibbous on the growing side.
    pub const fn is_waxing(self) -> bool {
        matches!(self, Self::WaxingCrescent | Self::WaxingGibbous)
    }

    /// Crescent or gibbous on the shrinking side.
    pub const fn is_waning(self) -> bool {
        matches!(self, Self::WaningGibbous | Self::WaningCrescent)
    }

    /// 0-based synodic index (NewMoon=0 .. WaningCrescent=7).
    pub const fn index(self) -> u8 {
        match self {
            Self::NewMoon => 0,
            Self::WaxingCrescent => 1,
            Self::FirstQuarter => 2,
            Self::WaxingGibbous => 3,
            Self::FullMoon => 4,
            Self::WaningGibbous => 5,
            Self::LastQuarter => 6,
            Self::WaningCrescent => 7,
        }
    }
}

impl std::fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification result of a total classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReading {
    pub phase: LunarPhase,
    /// True when the input lay outside the domain and was clamped.
    pub clamped: bool,
}

/// Clamp into `[0, max]`; NaN goes to the lower bound.
fn clamp_to_domain(value: f64, max: f64) -> (f64, bool) {
    if value.is_nan() || value < 0.0 {
        (0.0, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}

fn bucket(value: f64, boundaries: &[f64]) -> usize {
    boundaries.iter().take_while(|&&b| value >= b).count()
}

fn reading(
    value: f64,
    max: f64,
    boundaries: &[f64],
    pick: impl Fn(usize) -> LunarPhase,
) -> PhaseReading {
    let (v, clamped) = clamp_to_domain(value, max);
    if clamped {
        tracing::debug!(input = value, clamped_to = v, "phase input outside domain");
    }
    PhaseReading {
        phase: pick(bucket(v, boundaries)),
        clamped,
    }
}

/// Coarse 4-bucket phase from illumination percent.
pub fn classify_coarse(illumination_percent: f64) -> PhaseReading {
    reading(illumination_percent, COARSE_SCALE_MAX, &COARSE_BOUNDARIES, |i| {
        COARSE_PHASES[i]
    })
}

/// Fine 8-bucket phase from a synodic position on the 0..=200 scale.
pub fn classify_fine(synodic_position: f64) -> PhaseReading {
    reading(synodic_position, FINE_SCALE_MAX, &FINE_BOUNDARIES, |i| ALL_PHASES[i])
}

fn check_domain(value: f64, max: f64, what: &str) -> Result<(), AstroError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(AstroError::InvalidInput(format!(
            "{what} {value} outside 0..={max}"
        )))
    }
}

/// Coarse classification that rejects out-of-domain input.
pub fn try_classify_coarse(illumination_percent: f64) -> Result<LunarPhase, AstroError> {
    check_domain(illumination_percent, COARSE_SCALE_MAX, "illumination")?;
    Ok(classify_coarse(illumination_percent).phase)
}

/// Fine classification that rejects out-of-domain input.
pub fn try_classify_fine(synodic_position: f64) -> Result<LunarPhase, AstroError> {
    check_domain(synodic_position, FINE_SCALE_MAX, "synodic position")?;
    Ok(classify_fine(synodic_position).phase)
}
