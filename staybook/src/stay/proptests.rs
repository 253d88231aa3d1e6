//! Property-based tests for `DateRange`.

use super::DateRange;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

// Ranges within a two-year window so overlaps are common.
fn range_strategy() -> impl Strategy<Value = DateRange> {
    (0u64..730, 1u64..21).prop_map(|(offset, nights)| {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let check_in = base.checked_add_days(Days::new(offset)).unwrap();
        let check_out = check_in.checked_add_days(Days::new(nights)).unwrap();
        DateRange::new(check_in, check_out).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn overlap_matches_shared_night(a in range_strategy(), b in range_strategy()) {
        let shares_night = a
            .check_in()
            .iter_days()
            .take_while(|d| *d < a.check_out())
            .any(|d| b.contains(d));
        prop_assert_eq!(a.overlaps(&b), shares_night);
    }

    #[test]
    fn back_to_back_never_overlaps(a in range_strategy(), nights in 1u64..15) {
        let next = DateRange::new(
            a.check_out(),
            a.check_out().checked_add_days(Days::new(nights)).unwrap(),
        )
        .unwrap();
        prop_assert!(!a.overlaps(&next));
    }

    #[test]
    fn nights_match_day_difference(a in range_strategy()) {
        let days = (a.check_out() - a.check_in()).num_days();
        prop_assert_eq!(i64::from(a.nights()), days);
    }
}
