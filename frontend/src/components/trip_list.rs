use yew::prelude::*;

use shared::Trip;

use crate::components::sort_menu::{sort_trips, SortKey, SortMenu};
use crate::components::trip_card::TripCard;
use crate::services::api::ApiError;

#[derive(Properties, PartialEq)]
pub struct TripListProps {
    pub trips: Vec<Trip>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub on_view: Callback<String>,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(TripList)]
pub fn trip_list(props: &TripListProps) -> Html {
    // Trip id waiting for delete confirmation, if any
    let confirming = use_state(|| Option::<String>::None);
    let sort_by = use_state(SortKey::default);

    let on_sort_change = {
        let sort_by = sort_by.clone();
        Callback::from(move |key: SortKey| sort_by.set(key))
    };

    let request_delete = {
        let confirming = confirming.clone();
        Callback::from(move |id: String| confirming.set(Some(id)))
    };
    let cancel_delete = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(None))
    };
    let confirm_delete = {
        let confirming = confirming.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |_| {
            if let Some(id) = (*confirming).clone() {
                on_delete.emit(id);
            }
            confirming.set(None);
        })
    };

    if props.loading {
        return html! { <p class="loading">{ "Loading trips..." }</p> };
    }

    if let Some(error) = &props.error {
        return html! {
            <p class="error">{ format!("Could not load trips: {error}") }</p>
        };
    }

    if props.trips.is_empty() {
        return html! { <p class="empty">{ "No trips yet. Plan one!" }</p> };
    }

    let trips = sort_trips(&props.trips, *sort_by);

    html! {
        <div class="trip-list">
            <div class="trip-list-toolbar">
                <SortMenu value={*sort_by} on_change={on_sort_change} />
            </div>
            if confirming.is_some() {
                <div class="confirm-bar">
                    <span>{ "Delete this trip?" }</span>
                    <button class="danger" onclick={confirm_delete}>{ "Delete" }</button>
                    <button onclick={cancel_delete}>{ "Cancel" }</button>
                </div>
            }
            {
                trips.iter().map(|trip| html! {
                    <TripCard
                        key={trip.id.clone()}
                        trip={trip.clone()}
                        on_view={props.on_view.clone()}
                        on_edit={props.on_edit.clone()}
                        on_delete={request_delete.clone()}
                    />
                }).collect::<Html>()
            }
        </div>
    }
}
