//! Property-based tests for the no-overlap guarantee of both stores.

use chrono::{Days, NaiveDate, Utc};
use proptest::prelude::*;

use super::{MemoryStore, ReservationFilter, ReservationPatch, ReservationStore};
use crate::database::test_util::test_draft;
use crate::database::Database;
use crate::error::Error;
use crate::reservation::{BookingStatus, Reservation, ReservationId};

const PROPERTIES: [&str; 2] = ["cabin", "loft"];

#[derive(Debug, Clone)]
enum Op {
    Create {
        property: usize,
        offset: u64,
        nights: u64,
    },
    Cancel(usize),
}

// A 40-day window with short stays, so most requests collide with something.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..PROPERTIES.len(), 0u64..40, 1u64..7).prop_map(|(property, offset, nights)| {
            Op::Create { property, offset, nights }
        }),
        1 => (0usize..64).prop_map(Op::Cancel),
    ]
}

fn day(offset: u64) -> String {
    let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    base.checked_add_days(Days::new(offset)).unwrap().to_string()
}

fn assert_no_overlap(active: &[Reservation]) -> Result<(), TestCaseError> {
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if a.property_id == b.property_id {
                prop_assert!(
                    !a.stay.overlaps(&b.stay),
                    "{} ({}) overlaps {} ({})",
                    a.id,
                    a.stay,
                    b.id,
                    b.stay
                );
            }
        }
    }
    Ok(())
}

fn run<S: ReservationStore>(store: &S, ops: &[Op]) -> Result<(), TestCaseError> {
    let mut created: Vec<ReservationId> = Vec::new();

    for op in ops {
        match *op {
            Op::Create {
                property,
                offset,
                nights,
            } => {
                let draft = test_draft(PROPERTIES[property], &day(offset), &day(offset + nights));
                let stay = draft.stay;
                let overlapping = store
                    .list_active(&draft.property_id)
                    .unwrap()
                    .iter()
                    .any(|r| r.stay.overlaps(&stay));

                match store.atomic_insert(draft) {
                    Ok(r) => {
                        prop_assert!(!overlapping, "insert accepted over an active stay");
                        created.push(r.id);
                    }
                    Err(Error::DateConflict { conflicts, .. }) => {
                        prop_assert!(overlapping, "conflict reported for a free stay");
                        prop_assert!(!conflicts.is_empty());
                    }
                    Err(other) => return Err(TestCaseError::fail(format!("{other:?}"))),
                }
            }
            Op::Cancel(pick) => {
                if created.is_empty() {
                    continue;
                }
                let id = created[pick % created.len()];
                let cancelled = store
                    .update(id, &ReservationPatch::status(BookingStatus::Cancelled, Utc::now()))
                    .unwrap();
                prop_assert_eq!(cancelled.status, BookingStatus::Cancelled);
            }
        }

        let active: Vec<_> = store
            .list(&ReservationFilter::all())
            .unwrap()
            .into_iter()
            .filter(|r| r.is_active())
            .collect();
        assert_no_overlap(&active)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        .. ProptestConfig::default()
    })]

    #[test]
    fn memory_store_never_holds_overlapping_stays(
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        run(&MemoryStore::new(), &ops)?;
    }

    #[test]
    fn database_never_holds_overlapping_stays(
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        run(&Database::open_in_memory().unwrap(), &ops)?;
    }

    #[test]
    fn both_stores_agree_on_outcomes(
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let memory = MemoryStore::new();
        let database = Database::open_in_memory().unwrap();
        run(&memory, &ops)?;
        run(&database, &ops)?;

        let spans = |rs: Vec<Reservation>| -> Vec<_> {
            rs.into_iter().map(|r| (r.id, r.property_id, r.stay, r.status)).collect()
        };
        prop_assert_eq!(
            spans(memory.list(&ReservationFilter::all()).unwrap()),
            spans(database.list(&ReservationFilter::all()).unwrap())
        );
    }
}
