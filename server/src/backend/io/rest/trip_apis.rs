//! # REST API for Trips
//!
//! Endpoints for listing, reading, creating, updating and deleting trips.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info};

use crate::backend::domain::TripError;
use crate::backend::AppState;
use shared::{ErrorBody, TripDraft};

/// List all trips, most recently created first
pub async fn list_trips(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/trips");

    let trips = state.trip_service.list_trips();
    (StatusCode::OK, Json(trips)).into_response()
}

/// Get a single trip by id
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/trips/{}", id);

    match state.trip_service.get_trip(&id) {
        Ok(trip) => (StatusCode::OK, Json(trip)).into_response(),
        Err(e) => {
            error!("Failed to get trip {}: {}", id, e);
            error_response(e)
        }
    }
}

/// Create a new trip
pub async fn create_trip(
    State(state): State<AppState>,
    Json(draft): Json<TripDraft>,
) -> impl IntoResponse {
    info!("POST /api/trips - draft: {:?}", draft);

    match state.trip_service.create_trip(draft) {
        Ok(trip) => (StatusCode::CREATED, Json(trip)).into_response(),
        Err(e) => {
            error!("Failed to create trip: {}", e);
            error_response(e)
        }
    }
}

/// Replace an existing trip
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<TripDraft>,
) -> impl IntoResponse {
    info!("PUT /api/trips/{} - draft: {:?}", id, draft);

    match state.trip_service.update_trip(&id, draft) {
        Ok(trip) => (StatusCode::OK, Json(trip)).into_response(),
        Err(e) => {
            error!("Failed to update trip {}: {}", id, e);
            error_response(e)
        }
    }
}

/// Delete a trip, returning the removed record
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/trips/{}", id);

    match state.trip_service.delete_trip(&id) {
        Ok(trip) => (StatusCode::OK, Json(trip)).into_response(),
        Err(e) => {
            error!("Failed to delete trip {}: {}", id, e);
            error_response(e)
        }
    }
}

/// Translate a domain error into a status-coded JSON error body
fn error_response(err: TripError) -> Response {
    let status = match err {
        TripError::NotFound => StatusCode::NOT_FOUND,
        TripError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
