//! Wire types for the public events API.
//!
//! Events have no fixed schema: beyond the store-assigned integer `id`,
//! an event is whatever key/value pairs the client sent at creation or
//! update time. The payload is therefore an explicit mapping from field
//! name to JSON value, forwarded to the store without schema validation.
//! Callers that need schema enforcement must add it as a separate concern.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open-ended event payload: field name → JSON value.
///
/// Constructed via [`EventPayload::from_body`], which rejects empty and
/// non-object bodies, so a payload obtained that way always carries at
/// least one field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventPayload(Map<String, Value>);

impl EventPayload {
    /// Build a payload from a raw JSON request body.
    ///
    /// Returns `None` for `null`, `{}`, and any non-object body. These
    /// all count as "no data provided" at the API surface.
    pub fn from_body(body: Value) -> Option<Self> {
        match body {
            Value::Object(map) if !map.is_empty() => Some(Self(map)),
            _ => None,
        }
    }

    /// Field names in iteration order (alphabetical).
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert back into a JSON object value, e.g. for binding as `jsonb`.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for EventPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Response body for `GET /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListResponse {
    pub error: bool,
    pub events: Vec<Value>,
}

impl EventListResponse {
    pub fn new(events: Vec<Value>) -> Self {
        Self {
            error: false,
            events,
        }
    }
}

/// Response body for `GET /events/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub error: bool,
    pub event: Value,
}

impl EventResponse {
    pub fn new(event: Value) -> Self {
        Self {
            error: false,
            event,
        }
    }
}

/// Response body for a successful `POST /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreatedResponse {
    pub error: bool,
    pub id: i64,
    pub message: String,
}

impl EventCreatedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            error: false,
            id,
            message: "Event created successfully".to_owned(),
        }
    }
}

/// Success acknowledgement for update and delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub error: bool,
    pub message: String,
}

impl AckResponse {
    pub fn updated() -> Self {
        Self {
            error: false,
            message: "Event updated successfully".to_owned(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            error: false,
            message: "Event deleted successfully".to_owned(),
        }
    }
}

/// Error body for handled failures (`error` is always `true`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn not_found() -> Self {
        Self {
            error: true,
            message: "Event not found".to_owned(),
        }
    }

    pub fn no_data() -> Self {
        Self {
            error: true,
            message: "No data provided".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_from_object_body() {
        let payload = EventPayload::from_body(json!({"title": "Concert", "date": "2024-05-01"}));
        let payload = payload.expect("non-empty object is a valid payload");
        assert_eq!(payload.len(), 2);
        let columns: Vec<&str> = payload.columns().collect();
        assert_eq!(columns, vec!["date", "title"]);
    }

    #[test]
    fn payload_rejects_empty_and_non_object_bodies() {
        assert!(EventPayload::from_body(json!({})).is_none());
        assert!(EventPayload::from_body(json!(null)).is_none());
        assert!(EventPayload::from_body(json!([1, 2, 3])).is_none());
        assert!(EventPayload::from_body(json!("title")).is_none());
        assert!(EventPayload::from_body(json!(42)).is_none());
    }

    #[test]
    fn payload_round_trips_to_value() {
        let body = json!({"title": "Concert"});
        let payload = EventPayload::from_body(body.clone()).expect("valid payload");
        assert_eq!(payload.into_value(), body);
    }

    #[test]
    fn created_response_shape() {
        let body = serde_json::to_value(EventCreatedResponse::new(1)).expect("serializable");
        assert_eq!(
            body,
            json!({"error": false, "id": 1, "message": "Event created successfully"})
        );
    }

    #[test]
    fn ack_response_shapes() {
        let updated = serde_json::to_value(AckResponse::updated()).expect("serializable");
        assert_eq!(
            updated,
            json!({"error": false, "message": "Event updated successfully"})
        );

        let deleted = serde_json::to_value(AckResponse::deleted()).expect("serializable");
        assert_eq!(
            deleted,
            json!({"error": false, "message": "Event deleted successfully"})
        );
    }

    #[test]
    fn error_response_shapes() {
        let not_found = serde_json::to_value(ErrorResponse::not_found()).expect("serializable");
        assert_eq!(
            not_found,
            json!({"error": true, "message": "Event not found"})
        );

        let no_data = serde_json::to_value(ErrorResponse::no_data()).expect("serializable");
        assert_eq!(no_data, json!({"error": true, "message": "No data provided"}));
    }

    #[test]
    fn list_response_with_no_events() {
        let body = serde_json::to_value(EventListResponse::new(vec![])).expect("serializable");
        assert_eq!(body, json!({"error": false, "events": []}));
    }
}
