use std::future::Future;

use futures::future::{select, Either};
use gloo::net::http::{Request, Response};
use gloo::timers::future::TimeoutFuture;
use thiserror::Error;

use shared::{ErrorBody, Trip, TripDraft};

/// How long to wait for the server before giving up.
const REQUEST_TIMEOUT_MS: u32 = 8_000;

/// Errors surfaced by gateway calls.
///
/// The cache layer stores these as opaque text; only views interpret the
/// kind (a 404 renders differently from a network failure).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered 404 for an id-addressed operation.
    #[error("Not found")]
    NotFound,
    /// The response body did not match the trip wire shape.
    #[error("Unexpected response shape: {0}")]
    Schema(String),
    /// Transport failure, including timeout.
    #[error("Network error: {0}")]
    Network(String),
    /// Any other non-success status.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// API client for communicating with the trip planner backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client pointed at the configured API location.
    ///
    /// Reads `TRIPS_API_URL` at build time, falling back to the relative
    /// `/api` prefix that a dev-server proxy serves.
    pub fn new() -> Self {
        Self {
            base_url: option_env!("TRIPS_API_URL").unwrap_or("/api").to_string(),
        }
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Fetch every trip, most recently created first.
    pub async fn fetch_trips(&self) -> Result<Vec<Trip>, ApiError> {
        let url = format!("{}/trips", self.base_url);

        let response = send_with_timeout(Request::get(&url).send()).await?;
        parse_json(check_status(response).await?).await
    }

    /// Fetch a single trip by id.
    pub async fn fetch_trip(&self, id: &str) -> Result<Trip, ApiError> {
        let url = format!("{}/trips/{}", self.base_url, id);

        let response = send_with_timeout(Request::get(&url).send()).await?;
        parse_json(check_status(response).await?).await
    }

    /// Create a new trip, returning the stored record with its id.
    pub async fn create_trip(&self, draft: &TripDraft) -> Result<Trip, ApiError> {
        let url = format!("{}/trips", self.base_url);

        let request = Request::post(&url)
            .json(draft)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {e}")))?;
        let response = send_with_timeout(request.send()).await?;
        parse_json(check_status(response).await?).await
    }

    /// Replace an existing trip with the draft's values.
    pub async fn update_trip(&self, id: &str, draft: &TripDraft) -> Result<Trip, ApiError> {
        let url = format!("{}/trips/{}", self.base_url, id);

        let request = Request::put(&url)
            .json(draft)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {e}")))?;
        let response = send_with_timeout(request.send()).await?;
        parse_json(check_status(response).await?).await
    }

    /// Delete a trip, returning the removed record.
    pub async fn delete_trip(&self, id: &str) -> Result<Trip, ApiError> {
        let url = format!("{}/trips/{}", self.base_url, id);

        let response = send_with_timeout(Request::delete(&url).send()).await?;
        parse_json(check_status(response).await?).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Send a request, racing it against the gateway timeout.
async fn send_with_timeout<F>(send: F) -> Result<Response, ApiError>
where
    F: Future<Output = Result<Response, gloo::net::Error>>,
{
    let send = Box::pin(send);
    let timeout = Box::pin(TimeoutFuture::new(REQUEST_TIMEOUT_MS));

    match select(send, timeout).await {
        Either::Left((result, _)) => result.map_err(|e| ApiError::Network(e.to_string())),
        Either::Right(_) => Err(ApiError::Network(format!(
            "request timed out after {REQUEST_TIMEOUT_MS}ms"
        ))),
    }
}

/// Map a non-success status onto the gateway error taxonomy.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    if status == 404 {
        return Err(ApiError::NotFound);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    let message = if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    };

    Err(ApiError::Server { status, message })
}

/// Deserialize a response into the expected wire shape.
///
/// A payload that does not conform (missing required fields, wrong types)
/// is a schema error, never a silently accepted partial record.
async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Schema(e.to_string()))
}
