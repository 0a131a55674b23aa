//! Universally quantified properties of the cycle and the converter.

use std::sync::Arc;

use celtic_astro::{DataSourceError, IlluminationSource, LunarReading, NewMoonConfig};
use celtic_calendar::{
    ALL_MONTHS, CalendarError, NewMoonAnchors, OverflowPolicy, cycle_position, cycle_year,
    from_celtic_date, lunisolar_year_containing, month_lengths, to_celtic_date,
};
use chrono::NaiveDate;
use proptest::prelude::*;

/// Illumination falling linearly from 100 to 0 over 29 days, then wrapping.
struct Sawtooth {
    epoch: NaiveDate,
}

impl IlluminationSource for Sawtooth {
    fn reading(&self, d: NaiveDate) -> Result<LunarReading, DataSourceError> {
        let k = (d - self.epoch).num_days().rem_euclid(29);
        Ok(LunarReading::new((28 - k) as f64 * 100.0 / 28.0, false))
    }
}

fn anchors(shift: i64) -> NewMoonAnchors<Arc<Sawtooth>> {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(shift);
    NewMoonAnchors::new(Arc::new(Sawtooth { epoch }), NewMoonConfig::default())
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 1u32..=366).prop_map(|(y, ordinal)| {
        NaiveDate::from_yo_opt(y, ordinal)
            .or_else(|| NaiveDate::from_yo_opt(y, 365))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn month_lengths_periodic(year in -5000i32..5000) {
        prop_assert_eq!(month_lengths(year), month_lengths(year + 5));
    }

    #[test]
    fn any_year_has_a_cycle_position(year in any::<i32>()) {
        let position = cycle_position(year);
        prop_assert!((1..=5).contains(&position));
        prop_assert_eq!(month_lengths(year).len() == 13, position == 3 || position == 5);
    }

    #[test]
    fn twelve_or_thirteen_months(year in -5000i32..5000) {
        let cy = cycle_year(year);
        let expect_intercalary = cy.position == 3 || cy.position == 5;
        prop_assert!((1..=5).contains(&cy.position));
        prop_assert_eq!(cy.month_count(), if expect_intercalary { 13 } else { 12 });
        prop_assert_eq!(cy.total_days(), if expect_intercalary { 384 } else { 354 });
    }

    #[test]
    fn conversion_bounded_and_invertible(d in any_date(), shift in 0i64..29) {
        let locator = anchors(shift);
        match to_celtic_date(&locator, d, OverflowPolicy::Fail) {
            Ok(c) => {
                prop_assert!(!c.overflowed);
                prop_assert!(ALL_MONTHS.contains(&c.month));
                let year = lunisolar_year_containing(&locator, d).unwrap();
                let length = year.cycle.month_length(c.month.index()).unwrap();
                prop_assert!(c.day >= 1 && c.day <= length);
                prop_assert_eq!(from_celtic_date(&locator, year.anchor_year(), c).unwrap(), d);
            }
            Err(CalendarError::AnchoringInconsistency { delta_days, year_days, .. }) => {
                prop_assert!(delta_days >= i64::from(year_days));
            }
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }

    #[test]
    fn fallback_policy_never_fails(d in any_date(), shift in 0i64..29) {
        let c = to_celtic_date(&anchors(shift), d, OverflowPolicy::FirstMonth).unwrap();
        prop_assert!(c.day >= 1);
    }
}

#[test]
fn cycle_positions_over_one_period() {
    let positions: Vec<u8> = (2025..2030).map(cycle_position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    let long_years: Vec<i32> = (2025..2030).filter(|&y| cycle_year(y).has_intercalary_month()).collect();
    assert_eq!(long_years, vec![2027, 2029]);
}

#[test]
fn consecutive_days_advance_by_one() {
    let locator = anchors(3);
    let start = NaiveDate::from_ymd_opt(2031, 2, 15).unwrap();
    let mut prev = to_celtic_date(&locator, start, OverflowPolicy::Fail).unwrap();
    for offset in 1..200 {
        let d = start + chrono::Duration::days(offset);
        let cur = to_celtic_date(&locator, d, OverflowPolicy::Fail).unwrap();
        if cur.month == prev.month {
            assert_eq!(cur.day, prev.day + 1, "at {d}");
        } else {
            assert_eq!(cur.day, 1, "at {d}");
            assert_eq!(cur.month.index(), prev.month.index() + 1, "at {d}");
        }
        prev = cur;
    }
}
