use web_sys::HtmlSelectElement;
use yew::prelude::*;

use shared::Trip;

/// Orderings the trip list can be shown in. Sorting is purely client-side;
/// the server always answers in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    StartAsc,
    StartDesc,
    Name,
    Destination,
}

impl SortKey {
    fn value(self) -> &'static str {
        match self {
            SortKey::StartAsc => "start-asc",
            SortKey::StartDesc => "start-desc",
            SortKey::Name => "name",
            SortKey::Destination => "destination",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortKey::StartAsc => "Start date ↑",
            SortKey::StartDesc => "Start date ↓",
            SortKey::Name => "Name (A–Z)",
            SortKey::Destination => "Destination (A–Z)",
        }
    }

    fn from_value(value: &str) -> SortKey {
        match value {
            "start-desc" => SortKey::StartDesc,
            "name" => SortKey::Name,
            "destination" => SortKey::Destination,
            _ => SortKey::StartAsc,
        }
    }

    const ALL: [SortKey; 4] = [
        SortKey::StartAsc,
        SortKey::StartDesc,
        SortKey::Name,
        SortKey::Destination,
    ];
}

/// Return the trips reordered by `key`.
///
/// Dates sort lexicographically, which is correct for `YYYY-MM-DD`
/// strings; names and destinations sort case-insensitively.
pub fn sort_trips(trips: &[Trip], key: SortKey) -> Vec<Trip> {
    let mut sorted = trips.to_vec();
    match key {
        SortKey::StartAsc => sorted.sort_by(|a, b| a.start_date.cmp(&b.start_date)),
        SortKey::StartDesc => sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortKey::Name => {
            sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::Destination => sorted.sort_by(|a, b| {
            a.destination
                .to_lowercase()
                .cmp(&b.destination.to_lowercase())
        }),
    }
    sorted
}

#[derive(Properties, PartialEq)]
pub struct SortMenuProps {
    pub value: SortKey,
    pub on_change: Callback<SortKey>,
}

#[function_component(SortMenu)]
pub fn sort_menu(props: &SortMenuProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(SortKey::from_value(&select.value()));
        })
    };

    html! {
        <select class="sort-menu" aria-label="Sort trips" {onchange}>
            {for SortKey::ALL.iter().map(|key| html! {
                <option value={key.value()} selected={*key == props.value}>
                    {key.label()}
                </option>
            })}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(name: &str, destination: &str, start: &str) -> Trip {
        Trip {
            id: name.to_string(),
            name: name.to_string(),
            destination: destination.to_string(),
            start_date: start.to_string(),
            end_date: start.to_string(),
            notes: None,
        }
    }

    fn names(trips: &[Trip]) -> Vec<&str> {
        trips.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn sorts_by_start_date_in_both_directions() {
        let trips = vec![
            trip("B", "X", "2026-05-10"),
            trip("A", "Y", "2025-11-02"),
            trip("C", "Z", "2026-11-02"),
        ];

        assert_eq!(names(&sort_trips(&trips, SortKey::StartAsc)), ["A", "B", "C"]);
        assert_eq!(names(&sort_trips(&trips, SortKey::StartDesc)), ["C", "B", "A"]);
    }

    #[test]
    fn sorts_by_name_ignoring_case() {
        let trips = vec![
            trip("zanzibar", "X", "2026-01-01"),
            trip("Alps", "Y", "2026-01-02"),
        ];

        assert_eq!(names(&sort_trips(&trips, SortKey::Name)), ["Alps", "zanzibar"]);
    }

    #[test]
    fn sorts_by_destination() {
        let trips = vec![
            trip("A", "Tokyo & Kyoto", "2026-01-01"),
            trip("B", "Rome & Florence", "2026-01-02"),
        ];

        assert_eq!(names(&sort_trips(&trips, SortKey::Destination)), ["B", "A"]);
    }

    #[test]
    fn sorting_does_not_touch_the_input_order() {
        let trips = vec![trip("B", "X", "2026-05-10"), trip("A", "Y", "2025-11-02")];
        sort_trips(&trips, SortKey::StartAsc);

        assert_eq!(names(&trips), ["B", "A"]);
    }

    #[test]
    fn unknown_select_values_fall_back_to_the_default() {
        assert_eq!(SortKey::from_value("garbage"), SortKey::StartAsc);
        assert_eq!(SortKey::from_value("start-desc"), SortKey::StartDesc);
    }
}
