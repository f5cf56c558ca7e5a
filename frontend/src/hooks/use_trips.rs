use std::cell::RefCell;
use std::rc::Rc;

use shared::{Trip, TripDraft};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::query_cache::{
    MutationFlow, MutationPhase, QueryKey, QueryStatus, QueryValue, TripCache,
};

/// Snapshot of the trip list query exposed to views.
#[derive(Clone, PartialEq)]
pub struct TripsState {
    pub trips: Vec<Trip>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub mutation_phase: MutationPhase,
}

#[derive(Clone)]
pub struct UseTripsActions {
    pub refresh: Callback<()>,
    pub create_trip: Callback<TripDraft>,
    pub update_trip: Callback<(String, TripDraft)>,
    pub delete_trip: Callback<String>,
}

pub struct UseTripsResult {
    pub state: TripsState,
    pub actions: UseTripsActions,
}

/// Hook binding the trip list to the query cache and the gateway.
///
/// Mounting fetches the list through the cache (deduplicated against other
/// mounts of the same key). Mutation actions walk the
/// `Idle -> Mutating -> Invalidating -> Settled` flow and refetch the
/// invalidated keys before the phase reads `Settled`.
#[hook]
pub fn use_trips(api_client: &ApiClient, cache: &TripCache) -> UseTripsResult {
    let trips = use_state(Vec::<Trip>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<ApiError>::None);
    let mutation_phase = use_state(|| MutationPhase::Idle);
    let flow = use_mut_ref(MutationFlow::new);

    // Fetch the list through the cache
    let refresh = {
        let api_client = api_client.clone();
        let cache = cache.clone();
        let flow = flow.clone();
        let trips = trips.clone();
        let loading = loading.clone();
        let error = error.clone();
        let mutation_phase = mutation_phase.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let cache = cache.clone();
            let flow = flow.clone();
            let trips = trips.clone();
            let loading = loading.clone();
            let error = error.clone();
            let mutation_phase = mutation_phase.clone();

            let ticket = cache.borrow_mut().begin(QueryKey::Trips);
            let Some(ticket) = ticket else {
                // Another mount already fetched (or is fetching) this key.
                if let Some(QueryStatus::Success(QueryValue::Trips(cached))) =
                    cache.borrow().get(&QueryKey::Trips).cloned()
                {
                    trips.set(cached);
                    loading.set(false);
                }
                return;
            };

            loading.set(true);
            spawn_local(async move {
                let applied = match api_client.fetch_trips().await {
                    Ok(fetched) => {
                        let applied = cache.borrow_mut().resolve(
                            &QueryKey::Trips,
                            ticket,
                            QueryValue::Trips(fetched.clone()),
                        );
                        if applied {
                            trips.set(fetched);
                            error.set(None);
                        }
                        applied
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch trips:", e.to_string());
                        let applied = cache
                            .borrow_mut()
                            .reject(&QueryKey::Trips, ticket, e.to_string());
                        if applied {
                            error.set(Some(e));
                        }
                        applied
                    }
                };
                loading.set(false);

                // A discarded result must not settle someone else's
                // invalidation.
                if applied {
                    flow.borrow_mut().key_refreshed(&QueryKey::Trips);
                    mutation_phase.set(flow.borrow().phase().clone());
                }
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let create_trip = {
        let api_client = api_client.clone();
        let cache = cache.clone();
        let flow = flow.clone();
        let mutation_phase = mutation_phase.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |draft: TripDraft, _| {
            let api_client = api_client.clone();
            let cache = cache.clone();
            let flow = flow.clone();
            let mutation_phase = mutation_phase.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                flow.borrow_mut().start();
                mutation_phase.set(MutationPhase::Mutating);

                match api_client.create_trip(&draft).await {
                    Ok(_created) => {
                        flow.borrow_mut()
                            .complete(&mut cache.borrow_mut(), vec![QueryKey::Trips]);
                        mutation_phase.set(flow.borrow().phase().clone());
                        refresh.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to create trip:", e.to_string());
                        flow.borrow_mut().fail();
                        mutation_phase.set(MutationPhase::Idle);
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let update_trip = {
        let api_client = api_client.clone();
        let cache = cache.clone();
        let flow = flow.clone();
        let mutation_phase = mutation_phase.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |(id, draft): (String, TripDraft), _| {
            let api_client = api_client.clone();
            let cache = cache.clone();
            let flow = flow.clone();
            let mutation_phase = mutation_phase.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                flow.borrow_mut().start();
                mutation_phase.set(MutationPhase::Mutating);

                match api_client.update_trip(&id, &draft).await {
                    Ok(_updated) => {
                        // The detail entry is only refetched if some view
                        // ever looked at it.
                        let detail_key = QueryKey::Trip(id.clone());
                        let mut keys = vec![QueryKey::Trips];
                        let has_detail = cache.borrow().contains(&detail_key);
                        if has_detail {
                            keys.push(detail_key);
                        }

                        flow.borrow_mut().complete(&mut cache.borrow_mut(), keys);
                        mutation_phase.set(flow.borrow().phase().clone());

                        if has_detail {
                            refetch_trip(
                                api_client.clone(),
                                cache.clone(),
                                flow.clone(),
                                mutation_phase.clone(),
                                id.clone(),
                            );
                        }
                        refresh.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to update trip:", e.to_string());
                        flow.borrow_mut().fail();
                        mutation_phase.set(MutationPhase::Idle);
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let delete_trip = {
        let api_client = api_client.clone();
        let cache = cache.clone();
        let flow = flow.clone();
        let mutation_phase = mutation_phase.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |id: String, _| {
            let api_client = api_client.clone();
            let cache = cache.clone();
            let flow = flow.clone();
            let mutation_phase = mutation_phase.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                flow.borrow_mut().start();
                mutation_phase.set(MutationPhase::Mutating);

                match api_client.delete_trip(&id).await {
                    Ok(_removed) => {
                        // The record is gone; a refetch of its detail entry
                        // would only 404.
                        cache.borrow_mut().evict(&QueryKey::Trip(id.clone()));
                        flow.borrow_mut()
                            .complete(&mut cache.borrow_mut(), vec![QueryKey::Trips]);
                        mutation_phase.set(flow.borrow().phase().clone());
                        refresh.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to delete trip:", e.to_string());
                        flow.borrow_mut().fail();
                        mutation_phase.set(MutationPhase::Idle);
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    UseTripsResult {
        state: TripsState {
            trips: (*trips).clone(),
            loading: *loading,
            error: (*error).clone(),
            mutation_phase: (*mutation_phase).clone(),
        },
        actions: UseTripsActions {
            refresh,
            create_trip,
            update_trip,
            delete_trip,
        },
    }
}

/// Refetch one trip's detail entry after a mutation invalidated it.
fn refetch_trip(
    api_client: ApiClient,
    cache: TripCache,
    flow: Rc<RefCell<MutationFlow>>,
    mutation_phase: UseStateHandle<MutationPhase>,
    id: String,
) {
    spawn_local(async move {
        let key = QueryKey::Trip(id.clone());
        let ticket = cache.borrow_mut().begin(key.clone());
        let Some(ticket) = ticket else {
            return;
        };

        let applied = match api_client.fetch_trip(&id).await {
            Ok(trip) => cache
                .borrow_mut()
                .resolve(&key, ticket, QueryValue::Trip(trip)),
            Err(e) => {
                gloo::console::error!("Failed to refetch trip:", e.to_string());
                cache.borrow_mut().reject(&key, ticket, e.to_string())
            }
        };

        if applied {
            flow.borrow_mut().key_refreshed(&key);
            mutation_phase.set(flow.borrow().phase().clone());
        }
    });
}
