use serde::{Deserialize, Serialize};

/// A planned trip as stored by the server and sent over the wire.
///
/// `id` is assigned by the server on creation and never changes. Dates are
/// plain ISO-8601 calendar dates; the server does not require the end date
/// to come after the start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    /// Display name of the trip
    pub name: String,
    /// Where the trip goes
    pub destination: String,
    /// First day of the trip (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the trip (YYYY-MM-DD)
    pub end_date: String,
    /// Optional free-text notes, omitted from JSON when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request body for creating or updating a trip.
///
/// Update is a full replace, not a merge: a draft without `notes` clears
/// whatever notes the stored record had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// JSON error envelope returned by the API, e.g. `{"error":"Not found"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> Trip {
        Trip {
            id: "abc-123".to_string(),
            name: "Italy 2026".to_string(),
            destination: "Rome & Florence".to_string(),
            start_date: "2026-05-10".to_string(),
            end_date: "2026-05-20".to_string(),
            notes: Some("Gelato tour".to_string()),
        }
    }

    #[test]
    fn trip_serializes_with_camel_case_dates() {
        let json = serde_json::to_value(sample_trip()).unwrap();
        assert_eq!(json["startDate"], "2026-05-10");
        assert_eq!(json["endDate"], "2026-05-20");
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn trip_without_notes_omits_the_field() {
        let trip = Trip {
            notes: None,
            ..sample_trip()
        };
        let json = serde_json::to_value(trip).unwrap();
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn trip_round_trips_through_json() {
        let trip = sample_trip();
        let json = serde_json::to_string(&trip).unwrap();
        let back: Trip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trip);
    }

    #[test]
    fn trip_missing_required_field_is_rejected() {
        // No `name` field: this must fail to parse, not produce a partial
        // record.
        let json = r#"{
            "id": "abc-123",
            "destination": "Rome",
            "startDate": "2026-05-10",
            "endDate": "2026-05-20"
        }"#;
        assert!(serde_json::from_str::<Trip>(json).is_err());
    }

    #[test]
    fn trip_with_wrong_field_type_is_rejected() {
        let json = r#"{
            "id": "abc-123",
            "name": 42,
            "destination": "Rome",
            "startDate": "2026-05-10",
            "endDate": "2026-05-20"
        }"#;
        assert!(serde_json::from_str::<Trip>(json).is_err());
    }

    #[test]
    fn draft_accepts_absent_notes() {
        let json = r#"{
            "name": "Japan Adventure",
            "destination": "Tokyo & Kyoto",
            "startDate": "2025-11-02",
            "endDate": "2025-11-15"
        }"#;
        let draft: TripDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.notes, None);
    }
}
