mod components;
mod hooks;
mod services;

use yew::prelude::*;

use shared::TripDraft;

use crate::components::trip_form::TripForm;
use crate::components::trip_list::TripList;
use crate::hooks::use_trip::use_trip;
use crate::hooks::use_trips::use_trips;
use crate::services::api::{ApiClient, ApiError};
use crate::services::query_cache::{MutationPhase, QueryCache, QueryValue};

/// Which page the app is showing.
#[derive(Clone, PartialEq)]
enum View {
    List,
    New,
    Detail(String),
    Edit(String),
}

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let cache = use_mut_ref(QueryCache::<QueryValue>::new);
    let view = use_state(|| View::List);

    let trips = use_trips(&api_client, &cache);
    let detail_id = match &*view {
        View::Detail(id) | View::Edit(id) => Some(id.clone()),
        _ => None,
    };
    let detail = use_trip(&api_client, &cache, detail_id);

    let submitting = trips.state.mutation_phase == MutationPhase::Mutating;

    let on_view = {
        let view = view.clone();
        Callback::from(move |id: String| view.set(View::Detail(id)))
    };
    let on_edit = {
        let view = view.clone();
        Callback::from(move |id: String| view.set(View::Edit(id)))
    };
    let on_new = {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(View::New))
    };
    let on_back_click = {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(View::List))
    };
    let on_cancel = {
        let view = view.clone();
        Callback::from(move |_: ()| view.set(View::List))
    };

    let on_create = {
        let create_trip = trips.actions.create_trip.clone();
        let view = view.clone();
        Callback::from(move |draft: TripDraft| {
            create_trip.emit(draft);
            view.set(View::List);
        })
    };

    let content = match (*view).clone() {
        View::List => html! {
            <TripList
                trips={trips.state.trips.clone()}
                loading={trips.state.loading}
                error={trips.state.error.clone()}
                on_view={on_view.clone()}
                on_edit={on_edit.clone()}
                on_delete={trips.actions.delete_trip.clone()}
            />
        },
        View::New => html! {
            <TripForm
                title="New trip"
                submitting={submitting}
                on_submit={on_create.clone()}
                on_cancel={on_cancel.clone()}
            />
        },
        View::Detail(_) => {
            if detail.loading {
                html! { <p class="loading">{ "Loading trip..." }</p> }
            } else if detail.error == Some(ApiError::NotFound) {
                html! {
                    <div class="not-found">
                        <p class="error">{ "Trip not found" }</p>
                        <button onclick={on_back_click.clone()}>{ "Back to trips" }</button>
                    </div>
                }
            } else if let Some(error) = &detail.error {
                html! { <p class="error">{ format!("Could not load trip: {error}") }</p> }
            } else if let Some(trip) = &detail.trip {
                let edit_this = {
                    let on_edit = on_edit.clone();
                    let id = trip.id.clone();
                    Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
                };
                html! {
                    <div class="trip-detail">
                        <h2>{ trip.name.clone() }</h2>
                        <p class="trip-destination">{ trip.destination.clone() }</p>
                        <p class="trip-dates">
                            { format!("{} to {}", trip.start_date, trip.end_date) }
                        </p>
                        if let Some(notes) = &trip.notes {
                            <p class="trip-notes">{ notes.clone() }</p>
                        }
                        <div class="trip-detail-actions">
                            <button onclick={edit_this}>{ "Edit" }</button>
                            <button onclick={on_back_click.clone()}>{ "Back" }</button>
                        </div>
                    </div>
                }
            } else {
                html! { <p class="loading">{ "Loading trip..." }</p> }
            }
        }
        View::Edit(id) => {
            if let Some(trip) = detail.trip.clone() {
                let on_update = {
                    let update_trip = trips.actions.update_trip.clone();
                    let view = view.clone();
                    Callback::from(move |draft: TripDraft| {
                        update_trip.emit((id.clone(), draft));
                        view.set(View::List);
                    })
                };
                html! {
                    <TripForm
                        title="Edit trip"
                        initial={trip}
                        submitting={submitting}
                        on_submit={on_update}
                        on_cancel={on_cancel.clone()}
                    />
                }
            } else if detail.error == Some(ApiError::NotFound) {
                html! {
                    <div class="not-found">
                        <p class="error">{ "Trip not found" }</p>
                        <button onclick={on_back_click.clone()}>{ "Back to trips" }</button>
                    </div>
                }
            } else {
                html! { <p class="loading">{ "Loading trip..." }</p> }
            }
        }
    };

    html! {
        <div class="app">
            <header class="header">
                <h1>{ "Trip Planner" }</h1>
                if *view == View::List {
                    <button class="new-trip" onclick={on_new}>{ "New trip" }</button>
                }
            </header>
            <main>{ content }</main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
