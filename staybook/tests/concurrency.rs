//! Concurrent booking tests.
//!
//! Threads race to book overlapping stays. With the memory store they share
//! one engine; with `SQLite` each thread opens its own connection on the same
//! file, the way separate processes would.

mod common;

use std::sync::Barrier;
use std::thread;

use common::database::{create_test_database, database_path, open_at};
use common::{cabin_request, engine_with};
use staybook::{
    BookingStatus, CreateReservation, Error, MemoryStore, Reservation, ReservationFilter,
    ReservationStore,
};

const THREADS: usize = 8;

/// Retries while the store reports itself busy.
fn book<S: ReservationStore>(
    engine: &staybook::ReservationEngine<staybook::InMemoryCatalog, S>,
    request: &CreateReservation,
) -> staybook::Result<Reservation> {
    loop {
        match engine.create_reservation(request.clone()) {
            Err(err) if err.is_retryable() => thread::yield_now(),
            other => return other,
        }
    }
}

fn request_for(i: usize) -> CreateReservation {
    if i % 2 == 0 {
        cabin_request("2024-03-01", "2024-03-04", 2)
    } else {
        cabin_request("2024-03-03", "2024-03-06", 2)
    }
}

fn assert_single_winner(results: &[staybook::Result<Reservation>]) {
    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1, "exactly one booking must win: {results:?}");
    assert_eq!(winners[0].status, BookingStatus::Pending);
    assert!(winners[0].confirmation_code.as_str().starts_with("SB-"));

    for result in results {
        if let Err(err) = result {
            match err {
                Error::DateConflict { conflicts, .. } => {
                    assert_eq!(conflicts, &vec![winners[0].id]);
                }
                other => panic!("losers must see DateConflict, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_memory_store_overlapping_race() {
    let engine = engine_with(MemoryStore::new());
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let engine = &engine;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    book(engine, &request_for(i))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_single_winner(&results);
    assert_eq!(engine.store().len(), 1);
}

#[test]
fn test_sqlite_overlapping_race_across_connections() {
    let (dir, _db) = create_test_database();
    let path = database_path(&dir);
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let path = path.clone();
                let barrier = &barrier;
                s.spawn(move || {
                    let engine = engine_with(open_at(&path));
                    barrier.wait();
                    book(&engine, &request_for(i))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_single_winner(&results);

    let stored = open_at(&path).list(&ReservationFilter::all()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn test_disjoint_stays_all_succeed() {
    let (dir, _db) = create_test_database();
    let path = database_path(&dir);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let path = path.clone();
                s.spawn(move || {
                    let engine = engine_with(open_at(&path));
                    let day = 1 + 2 * i;
                    let request = cabin_request(
                        &format!("2024-04-{day:02}"),
                        &format!("2024-04-{:02}", day + 2),
                        2,
                    );
                    book(&engine, &request)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(Result::is_ok), "{results:?}");

    let mut codes: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().confirmation_code)
        .collect();
    codes.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    codes.dedup();
    assert_eq!(codes.len(), THREADS);
}

#[test]
fn test_concurrent_cancel_and_confirm_settle_consistently() {
    let engine = engine_with(MemoryStore::new());
    let created = engine
        .create_reservation(cabin_request("2024-03-01", "2024-03-04", 2))
        .unwrap();

    thread::scope(|s| {
        let confirm = s.spawn(|| engine.confirm_reservation(created.id));
        let cancel = s.spawn(|| engine.cancel_reservation(created.id, None));
        let confirmed = confirm.join().unwrap();
        cancel.join().unwrap().unwrap();

        // confirm either landed first or lost to an absorbing cancel
        if let Err(err) = confirmed {
            assert!(matches!(err, Error::InvalidTransition { .. }));
        }
    });

    let settled = engine.get_reservation(created.id).unwrap();
    assert_eq!(settled.status, BookingStatus::Cancelled);
}
