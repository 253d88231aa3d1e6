//! In-process reservation store.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::availability::find_conflicts;
use crate::error::{Error, Result};
use crate::property::PropertyId;
use crate::reservation::{ConfirmationCode, NewReservation, Reservation, ReservationId};

use super::{ReservationFilter, ReservationPatch, ReservationStore};

/// A reservation store held in memory.
///
/// Each property has its own insert lock held across conflict check and
/// insert. The scan runs under a shared read lock, so inserts for different
/// properties only contend for the short write that stores the record.
///
/// # Examples
///
/// ```
/// use staybook::{MemoryStore, PropertyId, ReservationStore};
///
/// let store = MemoryStore::new();
/// let active = store.list_active(&PropertyId::new("cabin").unwrap()).unwrap();
/// assert!(active.is_empty());
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    next_id: AtomicU64,
    records: RwLock<BTreeMap<ReservationId, Reservation>>,
    property_locks: Mutex<HashMap<PropertyId, Arc<Mutex<()>>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            records: RwLock::default(),
            property_locks: Mutex::default(),
        }
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reservations, cancelled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no reservations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn property_lock(&self, property: &PropertyId) -> Arc<Mutex<()>> {
        let mut locks = self
            .property_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(property.clone()).or_default())
    }
}

impl ReservationStore for MemoryStore {
    fn list_active(&self, property: &PropertyId) -> Result<Vec<Reservation>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .values()
            .filter(|r| r.property_id == *property && r.is_active())
            .cloned()
            .collect())
    }

    fn atomic_insert(&self, draft: NewReservation) -> Result<Reservation> {
        let lock = self.property_lock(&draft.property_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Inserts for this property are serialized by the guard, and updates
        // never make a cancelled record active again, so the scan stays valid
        // until the insert below.
        let conflicts = {
            let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
            find_conflicts(
                records.values().filter(|r| r.property_id == draft.property_id),
                &draft.stay,
            )
        };
        if !conflicts.is_empty() {
            return Err(Error::DateConflict {
                property: draft.property_id,
                conflicts,
            });
        }

        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let mut code = ConfirmationCode::generate();
        while records.values().any(|r| r.confirmation_code == code) {
            code = ConfirmationCode::generate();
        }

        let id = ReservationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let reservation = draft.into_reservation(id, code);
        records.insert(id, reservation.clone());
        Ok(reservation)
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(&id).cloned())
    }

    fn update(&self, id: ReservationId, patch: &ReservationPatch) -> Result<Reservation> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let reservation = records
            .get_mut(&id)
            .ok_or_else(|| Error::reservation_not_found(id))?;

        // apply to a copy so a rejected transition leaves the record intact
        let mut updated = reservation.clone();
        patch.apply(&mut updated)?;
        *reservation = updated.clone();
        Ok(updated)
    }

    fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}
