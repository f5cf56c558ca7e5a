use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::{Trip, TripDraft};

#[derive(Properties, PartialEq)]
pub struct TripFormProps {
    pub title: AttrValue,
    /// Existing trip to edit; empty form when absent.
    #[prop_or_default]
    pub initial: Option<Trip>,
    pub submitting: bool,
    pub on_submit: Callback<TripDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component(TripForm)]
pub fn trip_form(props: &TripFormProps) -> Html {
    let name = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_default()
    });
    let destination = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|t| t.destination.clone())
            .unwrap_or_default()
    });
    let start_date = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|t| t.start_date.clone())
            .unwrap_or_default()
    });
    let end_date = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|t| t.end_date.clone())
            .unwrap_or_default()
    });
    let notes = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|t| t.notes.clone())
            .unwrap_or_default()
    });
    let form_error = use_state(|| Option::<String>::None);

    let on_name_input = input_handler(name.clone());
    let on_destination_input = input_handler(destination.clone());
    let on_start_date_input = input_handler(start_date.clone());
    let on_end_date_input = input_handler(end_date.clone());
    let on_notes_input = {
        let notes = notes.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            notes.set(value);
        })
    };

    let onsubmit = {
        let name = name.clone();
        let destination = destination.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let notes = notes.clone();
        let form_error = form_error.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if name.trim().is_empty() || destination.trim().is_empty() {
                form_error.set(Some("Name and destination are required".to_string()));
                return;
            }
            if start_date.is_empty() || end_date.is_empty() {
                form_error.set(Some("Both dates are required".to_string()));
                return;
            }

            form_error.set(None);
            on_submit.emit(TripDraft {
                name: name.trim().to_string(),
                destination: destination.trim().to_string(),
                start_date: (*start_date).clone(),
                end_date: (*end_date).clone(),
                notes: if notes.trim().is_empty() {
                    None
                } else {
                    Some(notes.trim().to_string())
                },
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <form class="trip-form" {onsubmit}>
            <h2>{ props.title.clone() }</h2>
            if let Some(error) = &*form_error {
                <p class="error">{ error.clone() }</p>
            }
            <label>
                { "Name" }
                <input type="text" value={(*name).clone()} oninput={on_name_input} required=true />
            </label>
            <label>
                { "Destination" }
                <input type="text" value={(*destination).clone()} oninput={on_destination_input} required=true />
            </label>
            <label>
                { "Start date" }
                <input type="date" value={(*start_date).clone()} oninput={on_start_date_input} required=true />
            </label>
            <label>
                { "End date" }
                <input type="date" value={(*end_date).clone()} oninput={on_end_date_input} required=true />
            </label>
            <label>
                { "Notes" }
                <textarea value={(*notes).clone()} oninput={on_notes_input} />
            </label>
            <div class="trip-form-actions">
                <button type="submit" disabled={props.submitting}>
                    { if props.submitting { "Saving..." } else { "Save" } }
                </button>
                <button type="button" onclick={on_cancel}>{ "Cancel" }</button>
            </div>
        </form>
    }
}

fn input_handler(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let value = e.target_unchecked_into::<HtmlInputElement>().value();
        state.set(value);
    })
}
