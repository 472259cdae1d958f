//! Conference data pass-through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Conferencing attached to an event: either a request for the server to
/// create a new conference, or a reference to an existing one.
///
/// The payload is opaque to this crate and round-trips verbatim under the
/// wire `conferenceData` key; the variant only records which shape the
/// service will interpret it as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConferenceSolution {
    CreateRequest(Value),
    Existing(Value),
}

impl ConferenceSolution {
    /// Classify a wire `conferenceData` object by the presence of the
    /// `createRequest` key.
    pub fn from_wire(value: Value) -> Self {
        match &value {
            Value::Object(obj) if obj.contains_key("createRequest") => {
                ConferenceSolution::CreateRequest(value)
            }
            _ => ConferenceSolution::Existing(value),
        }
    }

    pub fn as_value(&self) -> &Value {
        match self {
            ConferenceSolution::CreateRequest(v) | ConferenceSolution::Existing(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_is_classified_by_key() {
        let data = json!({ "createRequest": { "requestId": "abc123" } });
        let conference = ConferenceSolution::from_wire(data.clone());

        assert_eq!(conference, ConferenceSolution::CreateRequest(data));
    }

    #[test]
    fn anything_else_is_an_existing_conference() {
        let data = json!({ "entryPoints": [{ "entryPointType": "video", "uri": "https://meet.example.com/x" }] });
        let conference = ConferenceSolution::from_wire(data.clone());

        assert_eq!(conference, ConferenceSolution::Existing(data));
    }
}
