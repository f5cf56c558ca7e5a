//! # Backend
//!
//! Everything between the HTTP socket and the trip collection, in three
//! layers:
//! ```text
//! IO (REST handlers)
//!     ↓
//! Domain (validation, services)
//!     ↓
//! Storage (in-memory trip collection)
//! ```
//!
//! The storage layer owns the canonical trip collection; the domain layer
//! is the validation boundary; the IO layer translates domain outcomes
//! into HTTP responses. Nothing outside the storage layer touches the
//! collection directly.

pub mod domain;
pub mod io;
pub mod storage;

use axum::{
    http::Method,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::backend::domain::TripService;
use crate::backend::storage::TripStore;
use crate::config::ServerConfig;
use shared::TripDraft;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub trip_service: TripService,
}

/// Build the application state and the store backing it
pub fn initialize_backend() -> AppState {
    info!("Setting up trip store");
    let store = TripStore::new();

    AppState {
        trip_service: TripService::new(store),
    }
}

/// Fill an empty store with a few example trips for demos and local
/// development.
pub fn seed_demo_trips(app_state: &AppState) {
    let samples = [
        TripDraft {
            name: "Virginia Trip".to_string(),
            destination: "Winchester, VA".to_string(),
            start_date: "2026-11-02".to_string(),
            end_date: "2026-11-15".to_string(),
            notes: Some("Apple orchards".to_string()),
        },
        TripDraft {
            name: "Japan Adventure".to_string(),
            destination: "Tokyo & Kyoto".to_string(),
            start_date: "2025-11-02".to_string(),
            end_date: "2025-11-15".to_string(),
            notes: Some("Autumn leaves & sushi".to_string()),
        },
        TripDraft {
            name: "Italy 2026".to_string(),
            destination: "Rome & Florence".to_string(),
            start_date: "2026-05-10".to_string(),
            end_date: "2026-05-20".to_string(),
            notes: Some("Gelato tour".to_string()),
        },
    ];

    for draft in samples {
        if let Err(e) = app_state.trip_service.create_trip(draft) {
            warn!("Skipped demo trip: {}", e);
        }
    }
}

/// Build the router, nesting the trip routes under `/api`
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    // CORS setup so the frontend can call us from a different origin
    // during development
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match config.allowed_origin.clone() {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .route("/trips", get(io::list_trips).post(io::create_trip))
        .route(
            "/trips/:id",
            get(io::get_trip)
                .put(io::update_trip)
                .delete(io::delete_trip),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            allowed_origin: None,
            seed_demo: false,
        };
        create_router(initialize_backend(), &config)
    }

    async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn italy_body() -> Value {
        json!({
            "name": "Italy 2026",
            "destination": "Rome & Florence",
            "startDate": "2026-05-10",
            "endDate": "2026-05-20",
            "notes": "Gelato tour"
        })
    }

    #[tokio::test]
    async fn created_trip_is_readable_then_gone_after_delete() {
        let app = test_router();

        let (status, created) = request(&app, "POST", "/api/trips", Some(italy_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = request(&app, "GET", &format!("/api/trips/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Italy 2026");
        assert_eq!(fetched["destination"], "Rome & Florence");
        assert_eq!(fetched["startDate"], "2026-05-10");
        assert_eq!(fetched["endDate"], "2026-05-20");

        let (status, deleted) = request(&app, "DELETE", &format!("/api/trips/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["id"], id.as_str());

        let (status, body) = request(&app, "GET", &format!("/api/trips/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn list_reflects_create_and_delete() {
        let app = test_router();

        let (_, created) = request(&app, "POST", "/api/trips", Some(italy_body())).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, listed) = request(&app, "GET", "/api/trips", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        request(&app, "DELETE", &format!("/api/trips/{id}"), None).await;

        let (_, listed) = request(&app, "GET", "/api/trips", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn newest_trip_is_listed_first() {
        let app = test_router();

        request(&app, "POST", "/api/trips", Some(italy_body())).await;
        request(
            &app,
            "POST",
            "/api/trips",
            Some(json!({
                "name": "Japan Adventure",
                "destination": "Tokyo & Kyoto",
                "startDate": "2025-11-02",
                "endDate": "2025-11-15"
            })),
        )
        .await;

        let (_, listed) = request(&app, "GET", "/api/trips", None).await;
        let trips = listed.as_array().unwrap();
        assert_eq!(trips[0]["name"], "Japan Adventure");
        assert_eq!(trips[1]["name"], "Italy 2026");
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let app = test_router();

        let (_, created) = request(&app, "POST", "/api/trips", Some(italy_body())).await;
        let id = created["id"].as_str().unwrap().to_string();

        // No notes in the update body: the stored notes must go away.
        let (status, updated) = request(
            &app,
            "PUT",
            &format!("/api/trips/{id}"),
            Some(json!({
                "name": "Italy 2027",
                "destination": "Rome",
                "startDate": "2027-05-10",
                "endDate": "2027-05-20"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Italy 2027");
        assert!(updated.get("notes").is_none());

        let (_, fetched) = request(&app, "GET", &format!("/api/trips/{id}"), None).await;
        assert!(fetched.get("notes").is_none());
    }

    #[tokio::test]
    async fn body_missing_required_fields_is_rejected() {
        let app = test_router();

        let (status, _) = request(
            &app,
            "POST",
            "/api/trips",
            Some(json!({"name": "Italy 2026", "destination": "Rome"})),
        )
        .await;
        assert!(status.is_client_error());

        let (_, listed) = request(&app, "GET", "/api/trips", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 0);
    }

    #[test]
    fn demo_seed_lists_italy_first() {
        let app_state = initialize_backend();
        seed_demo_trips(&app_state);

        let trips = app_state.trip_service.list_trips();
        assert_eq!(trips.len(), 3);
        assert_eq!(trips[0].name, "Italy 2026");
        assert_eq!(trips[2].name, "Virginia Trip");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let app = test_router();

        let (status, body) = request(
            &app,
            "PUT",
            "/api/trips/no-such-id",
            Some(italy_body()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }
}
