use chrono::NaiveDate;
use yew::prelude::*;

use shared::Trip;

#[derive(Properties, PartialEq)]
pub struct TripCardProps {
    pub trip: Trip,
    pub on_view: Callback<String>,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(TripCard)]
pub fn trip_card(props: &TripCardProps) -> Html {
    let on_view = {
        let on_view = props.on_view.clone();
        let id = props.trip.id.clone();
        Callback::from(move |_| on_view.emit(id.clone()))
    };
    let on_edit = {
        let on_edit = props.on_edit.clone();
        let id = props.trip.id.clone();
        Callback::from(move |_| on_edit.emit(id.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = props.trip.id.clone();
        Callback::from(move |_| on_delete.emit(id.clone()))
    };

    html! {
        <div class="trip-card">
            <h3 class="trip-name">{ props.trip.name.clone() }</h3>
            <p class="trip-destination">{ props.trip.destination.clone() }</p>
            <p class="trip-dates">
                { format!(
                    "{} → {}",
                    format_date(&props.trip.start_date),
                    format_date(&props.trip.end_date)
                ) }
                if let Some(days) = duration_days(&props.trip.start_date, &props.trip.end_date) {
                    <span class="trip-duration">{ format!("{days}d") }</span>
                }
            </p>
            if let Some(notes) = &props.trip.notes {
                <p class="trip-notes">{ notes.clone() }</p>
            }
            <div class="trip-card-actions">
                <button onclick={on_view}>{ "View" }</button>
                <button onclick={on_edit}>{ "Edit" }</button>
                <button class="danger" onclick={on_delete}>{ "Delete" }</button>
            </div>
        </div>
    }
}

/// Render `YYYY-MM-DD` as a short human date ("May 10"). A value that does
/// not parse is shown as-is rather than hidden.
fn format_date(value: &str) -> String {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%b %-d").to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Whole days between the two dates, when both parse.
fn duration_days(start: &str, end: &str) -> Option<i64> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").ok()?;
    Some((end - start).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_short_and_human() {
        assert_eq!(format_date("2026-05-10"), "May 10");
        assert_eq!(format_date("2025-11-02"), "Nov 2");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("whenever"), "whenever");
    }

    #[test]
    fn duration_counts_whole_days() {
        assert_eq!(duration_days("2026-05-10", "2026-05-20"), Some(10));
        assert_eq!(duration_days("2026-05-10", "2026-05-10"), Some(0));
    }

    #[test]
    fn reversed_dates_yield_a_negative_duration() {
        // The server allows end before start; the card simply reports it.
        assert_eq!(duration_days("2026-05-20", "2026-05-10"), Some(-10));
    }

    #[test]
    fn bad_dates_have_no_duration() {
        assert_eq!(duration_days("soon", "2026-05-10"), None);
    }
}
