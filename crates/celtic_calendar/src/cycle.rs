//! The 5-year intercalation cycle.
//!
//! Position in the cycle is `(anchor_year - 2025).rem_euclid(5) + 1`.
//! Every year has twelve months alternating 30 and 29 days (354 days);
//! positions 3 and 5 append the 30-day Sonnocingos (384 days).

/// Reference year of cycle position 1.
pub const CYCLE_EPOCH_YEAR: i32 = 2025;

/// Length of the intercalation cycle in years.
pub const CYCLE_YEARS: i32 = 5;

/// 1-based cycle positions that carry the intercalary month.
pub const INTERCALARY_POSITIONS: [u8; 2] = [3, 5];

/// Length of the intercalary month.
pub const INTERCALARY_MONTH_DAYS: u32 = 30;

/// Days in a year without the intercalary month.
pub const COMMON_YEAR_DAYS: u32 = 354;

/// Days in a year with the intercalary month.
pub const INTERCALARY_YEAR_DAYS: u32 = 384;

const COMMON_MONTHS: [u32; 12] = [30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29];
const INTERCALARY_MONTHS: [u32; 13] = [
    30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29, INTERCALARY_MONTH_DAYS,
];

/// 1-based position of `anchor_year` in the 5-year cycle.
pub fn cycle_position(anchor_year: i32) -> u8 {
    let offset = i64::from(anchor_year) - i64::from(CYCLE_EPOCH_YEAR);
    (offset.rem_euclid(i64::from(CYCLE_YEARS)) + 1) as u8
}

/// Ordered month lengths for the lunisolar year anchored in `anchor_year`.
pub fn month_lengths(anchor_year: i32) -> &'static [u32] {
    if INTERCALARY_POSITIONS.contains(&cycle_position(anchor_year)) {
        &INTERCALARY_MONTHS
    } else {
        &COMMON_MONTHS
    }
}

/// Month structure of one lunisolar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleYear {
    /// Gregorian year of the anchor (first new moon).
    pub anchor_year: i32,
    /// Position in the 5-year cycle (1-5).
    pub position: u8,
    /// Month lengths in order, 12 or 13 entries.
    pub month_lengths: &'static [u32],
}

/// Cycle year for `anchor_year`.
pub fn cycle_year(anchor_year: i32) -> CycleYear {
    CycleYear {
        anchor_year,
        position: cycle_position(anchor_year),
        month_lengths: month_lengths(anchor_year),
    }
}

impl CycleYear {
    pub fn month_count(&self) -> usize {
        self.month_lengths.len()
    }

    pub fn has_intercalary_month(&self) -> bool {
        self.month_lengths.len() == INTERCALARY_MONTHS.len()
    }

    /// Total days in the year (354 or 384).
    pub fn total_days(&self) -> u32 {
        self.month_lengths.iter().sum()
    }

    /// Length of the month at `index`, if the year has it.
    pub fn month_length(&self, index: usize) -> Option<u32> {
        self.month_lengths.get(index).copied()
    }

    /// Days in all months before `index`, if the year has that month.
    pub fn days_before(&self, index: usize) -> Option<u32> {
        if index >= self.month_lengths.len() {
            return None;
        }
        Some(self.month_lengths[..index].iter().sum())
    }
}
