//! Property-based tests for reservation identifiers and statuses.

use super::{BookingStatus, ReservationId, RequesterId};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = BookingStatus> {
    prop::sample::select(BookingStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Display and FromStr agree
    #[test]
    fn reservation_id_display_parses_back(value in 0u64..1_000_000_000) {
        let id = ReservationId::new(value);
        prop_assert_eq!(id.to_string().parse::<ReservationId>().unwrap(), id);
    }

    // Ordering of ids follows the raw value
    #[test]
    fn reservation_id_order(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(ReservationId::new(a).cmp(&ReservationId::new(b)), a.cmp(&b));
    }

    // Cancelled is absorbing and nothing returns to pending
    #[test]
    fn lifecycle_is_monotonic(from in status_strategy(), to in status_strategy()) {
        if from == BookingStatus::Cancelled || to == BookingStatus::Pending {
            prop_assert!(!from.can_transition_to(to));
        }
    }

    // Any sequence of permitted transitions is at most two steps long
    #[test]
    fn lifecycle_has_no_cycles(steps in prop::collection::vec(status_strategy(), 0..10)) {
        let mut current = BookingStatus::Pending;
        let mut applied = 0;
        for next in steps {
            if current.can_transition_to(next) {
                current = next;
                applied += 1;
            }
        }
        prop_assert!(applied <= 2);
    }

    // Requester ids are stored trimmed
    #[test]
    fn requester_id_trims(core in "[a-z0-9-]{1,20}", pad in " {0,3}") {
        let id = RequesterId::new(format!("{pad}{core}{pad}")).unwrap();
        prop_assert_eq!(id.as_str(), core.as_str());
    }
}
