use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::storage::TripStore;
use shared::{Trip, TripDraft};

/// Errors surfaced by trip operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    /// No trip with the requested id exists.
    #[error("Not found")]
    NotFound,
    /// The submitted draft failed validation.
    #[error("{0}")]
    Validation(String),
}

/// Service for managing trips.
///
/// Owns validation and logging; delegates the collection itself to the
/// [`TripStore`] handed in at construction time.
#[derive(Clone)]
pub struct TripService {
    store: TripStore,
}

impl TripService {
    /// Create a new TripService backed by the given store.
    pub fn new(store: TripStore) -> Self {
        Self { store }
    }

    /// List all trips, most recently created first.
    pub fn list_trips(&self) -> Vec<Trip> {
        let trips = self.store.list();
        info!("Listed {} trips", trips.len());
        trips
    }

    /// Get a single trip by id.
    pub fn get_trip(&self, id: &str) -> Result<Trip, TripError> {
        match self.store.get(id) {
            Some(trip) => Ok(trip),
            None => {
                warn!("Trip not found: {}", id);
                Err(TripError::NotFound)
            }
        }
    }

    /// Create a new trip from a validated draft.
    pub fn create_trip(&self, draft: TripDraft) -> Result<Trip, TripError> {
        validate_draft(&draft)?;

        let trip = self.store.create(draft);
        info!("Created trip '{}' with ID: {}", trip.name, trip.id);
        Ok(trip)
    }

    /// Replace every field of an existing trip with the draft's values.
    pub fn update_trip(&self, id: &str, draft: TripDraft) -> Result<Trip, TripError> {
        validate_draft(&draft)?;

        match self.store.update(id, draft) {
            Some(trip) => {
                info!("Updated trip '{}' with ID: {}", trip.name, trip.id);
                Ok(trip)
            }
            None => {
                warn!("Trip not found for update: {}", id);
                Err(TripError::NotFound)
            }
        }
    }

    /// Delete a trip, returning the removed record.
    pub fn delete_trip(&self, id: &str) -> Result<Trip, TripError> {
        match self.store.remove(id) {
            Some(trip) => {
                info!("Deleted trip '{}' with ID: {}", trip.name, trip.id);
                Ok(trip)
            }
            None => {
                warn!("Trip not found for delete: {}", id);
                Err(TripError::NotFound)
            }
        }
    }
}

/// Validate a draft before it reaches the store.
///
/// The end date is allowed to precede the start date; only the date
/// format itself is checked.
fn validate_draft(draft: &TripDraft) -> Result<(), TripError> {
    if draft.name.trim().is_empty() {
        return Err(TripError::Validation(
            "Trip name cannot be empty".to_string(),
        ));
    }

    if draft.destination.trim().is_empty() {
        return Err(TripError::Validation(
            "Trip destination cannot be empty".to_string(),
        ));
    }

    validate_date("startDate", &draft.start_date)?;
    validate_date("endDate", &draft.end_date)?;

    Ok(())
}

fn validate_date(field: &str, value: &str) -> Result<(), TripError> {
    // chrono accepts unpadded months and days, so round-trip the parse to
    // require the canonical zero-padded form.
    let canonical = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string());
    match canonical {
        Ok(canonical) if canonical == value => Ok(()),
        _ => Err(TripError::Validation(format!(
            "{field} must be a YYYY-MM-DD date, got '{value}'"
        ))),
    }
}
