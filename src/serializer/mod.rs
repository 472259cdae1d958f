//! Conversion between the in-memory event model and the service's wire JSON.
//!
//! The wire shape does not match the model shape (camelCase keys, tagged
//! start/end objects, the `useDefault`/`overrides` reminder envelope), so the
//! mapping is written by hand field by field rather than derived.

mod from_json;
mod to_json;

use serde_json::Value;

use crate::error::EventResult;

/// Serialize a model type into its wire JSON representation.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// Deserialize a model type from its wire JSON representation.
pub trait FromJson: Sized {
    fn from_json(value: Value) -> EventResult<Self>;
}

/// Top-level wire keys with a typed field on `Event`. Everything else is
/// preserved in `other`; passthrough keys colliding with this set are dropped
/// on serialization so they cannot shadow typed fields.
pub(crate) const RECOGNIZED_KEYS: &[&str] = &[
    "id",
    "summary",
    "description",
    "location",
    "start",
    "end",
    "recurrence",
    "colorId",
    "visibility",
    "attendees",
    "attachments",
    "conferenceData",
    "reminders",
    "updated",
];
