use shared::Trip;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::query_cache::{QueryKey, QueryStatus, QueryValue, TripCache};

/// Snapshot of a single trip query exposed to views.
#[derive(Clone, PartialEq)]
pub struct TripState {
    pub trip: Option<Trip>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// Hook binding one trip's detail query to the cache and the gateway.
///
/// Passing `None` renders the hook inert (yew hooks cannot be called
/// conditionally). Unmounting before the fetch resolves cancels the
/// ticket, so the late result is discarded instead of being applied.
#[hook]
pub fn use_trip(api_client: &ApiClient, cache: &TripCache, id: Option<String>) -> TripState {
    let trip = use_state(|| Option::<Trip>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<ApiError>::None);

    {
        let api_client = api_client.clone();
        let cache = cache.clone();
        let trip = trip.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with(id, move |id| {
            let cleanup: Box<dyn FnOnce()> = match id {
                None => Box::new(|| ()),
                Some(id) => {
                    let id = id.clone();
                    let key = QueryKey::Trip(id.clone());
                    trip.set(None);
                    error.set(None);

                    let ticket = cache.borrow_mut().begin(key.clone());
                    match ticket {
                        None => {
                            match cache.borrow().get(&key).cloned() {
                                Some(QueryStatus::Success(QueryValue::Trip(cached))) => {
                                    trip.set(Some(cached));
                                    loading.set(false);
                                }
                                Some(QueryStatus::Error(_)) | None => loading.set(false),
                                // Another mount's fetch is in flight.
                                _ => loading.set(true),
                            }
                            Box::new(|| ())
                        }
                        Some(ticket) => {
                            loading.set(true);

                            let fetch_cache = cache.clone();
                            let fetch_key = key.clone();
                            spawn_local(async move {
                                match api_client.fetch_trip(&id).await {
                                    Ok(fetched) => {
                                        let applied = fetch_cache.borrow_mut().resolve(
                                            &fetch_key,
                                            ticket,
                                            QueryValue::Trip(fetched.clone()),
                                        );
                                        if applied {
                                            trip.set(Some(fetched));
                                        }
                                    }
                                    Err(e) => {
                                        gloo::console::error!(
                                            "Failed to fetch trip:",
                                            e.to_string()
                                        );
                                        let applied = fetch_cache.borrow_mut().reject(
                                            &fetch_key,
                                            ticket,
                                            e.to_string(),
                                        );
                                        if applied {
                                            error.set(Some(e));
                                        }
                                    }
                                }
                                loading.set(false);
                            });

                            Box::new(move || {
                                cache.borrow_mut().cancel(&key, ticket);
                            })
                        }
                    }
                }
            };
            cleanup
        });
    }

    TripState {
        trip: (*trip).clone(),
        loading: *loading,
        error: (*error).clone(),
    }
}
