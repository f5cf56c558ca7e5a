//! # In-Memory Trip Store
//!
//! The canonical, process-lifetime collection of trips. The collection is
//! an ordered sequence: new trips go to the front, and updates keep a
//! trip's position.

use std::sync::{Arc, Mutex, MutexGuard};

use shared::{Trip, TripDraft};
use uuid::Uuid;

/// Handle to the canonical trip collection.
///
/// Clones share the same underlying collection; independent collections
/// are created with [`TripStore::new`]. The store performs no field
/// validation, that is the domain layer's job.
#[derive(Clone, Default)]
pub struct TripStore {
    trips: Arc<Mutex<Vec<Trip>>>,
}

impl TripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Trip>> {
        self.trips.lock().expect("trip store mutex poisoned")
    }

    /// All trips in collection order, most recently created first.
    pub fn list(&self) -> Vec<Trip> {
        self.lock().clone()
    }

    /// Find a trip by id.
    pub fn get(&self, id: &str) -> Option<Trip> {
        self.lock().iter().find(|t| t.id == id).cloned()
    }

    /// Assign a fresh id, insert the new trip at the front of the
    /// collection, and return the stored record.
    pub fn create(&self, draft: TripDraft) -> Trip {
        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            destination: draft.destination,
            start_date: draft.start_date,
            end_date: draft.end_date,
            notes: draft.notes,
        };
        self.lock().insert(0, trip.clone());
        trip
    }

    /// Replace the trip with `id` in place, keeping its position.
    ///
    /// Every field except `id` is overwritten from the draft; a draft
    /// without notes clears stored notes.
    pub fn update(&self, id: &str, draft: TripDraft) -> Option<Trip> {
        let mut trips = self.lock();
        let slot = trips.iter_mut().find(|t| t.id == id)?;
        *slot = Trip {
            id: slot.id.clone(),
            name: draft.name,
            destination: draft.destination,
            start_date: draft.start_date,
            end_date: draft.end_date,
            notes: draft.notes,
        };
        Some(slot.clone())
    }

    /// Remove the trip with `id`, returning the removed record.
    pub fn remove(&self, id: &str) -> Option<Trip> {
        let mut trips = self.lock();
        let index = trips.iter().position(|t| t.id == id)?;
        Some(trips.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn draft(name: &str) -> TripDraft {
        TripDraft {
            name: name.to_string(),
            destination: "Somewhere".to_string(),
            start_date: "2026-05-10".to_string(),
            end_date: "2026-05-20".to_string(),
            notes: None,
        }
    }

    #[test]
    fn created_ids_are_unique() {
        let store = TripStore::new();
        let ids: HashSet<String> = (0..50)
            .map(|i| store.create(draft(&format!("Trip {i}"))).id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn newest_trip_comes_first() {
        let store = TripStore::new();
        store.create(draft("First"));
        store.create(draft("Second"));

        let trips = store.list();
        assert_eq!(trips[0].name, "Second");
        assert_eq!(trips[1].name, "First");
    }

    #[test]
    fn created_trip_round_trips_through_get() {
        let store = TripStore::new();
        let created = store.create(TripDraft {
            notes: Some("bring sunscreen".to_string()),
            ..draft("Beach")
        });

        assert_eq!(store.get(&created.id), Some(created));
    }

    #[test]
    fn update_replaces_rather_than_merges() {
        let store = TripStore::new();
        let created = store.create(TripDraft {
            notes: Some("old notes".to_string()),
            ..draft("Original")
        });

        let updated = store.update(&created.id, draft("Renamed")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.notes, None);
    }

    #[test]
    fn update_keeps_position_in_the_collection() {
        let store = TripStore::new();
        let oldest = store.create(draft("Oldest"));
        store.create(draft("Middle"));
        store.create(draft("Newest"));

        store.update(&oldest.id, draft("Oldest renamed")).unwrap();

        let trips = store.list();
        assert_eq!(trips[2].id, oldest.id);
        assert_eq!(trips[2].name, "Oldest renamed");
    }

    #[test]
    fn remove_returns_the_record_and_forgets_it() {
        let store = TripStore::new();
        let created = store.create(draft("Doomed"));

        let removed = store.remove(&created.id).unwrap();
        assert_eq!(removed.id, created.id);

        assert_eq!(store.get(&created.id), None);
        assert!(store.list().iter().all(|t| t.id != created.id));
    }

    #[test]
    fn unknown_ids_are_signalled_consistently() {
        let store = TripStore::new();
        store.create(draft("Innocent bystander"));

        assert_eq!(store.get("no-such-id"), None);
        assert_eq!(store.update("no-such-id", draft("Whatever")), None);
        assert_eq!(store.remove("no-such-id"), None);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn clones_share_the_same_collection() {
        let store = TripStore::new();
        let clone = store.clone();
        store.create(draft("Shared"));

        assert_eq!(clone.list().len(), 1);
        assert_eq!(TripStore::new().list().len(), 0);
    }
}
