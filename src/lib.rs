//! Client-side event model for the Google Calendar API.
//!
//! This crate models the calendar `Event` resource and its wire JSON contract:
//! - local enforcement of the service's validation rules before any network call
//! - date-vs-datetime normalization with IANA timezones
//! - bidirectional conversion to and from the REST wire representation
//!
//! Transport, authentication, and the calendar/ACL/settings resources are the
//! API client's concern; this crate only produces and consumes the event JSON
//! those endpoints exchange.

pub mod attachment;
pub mod attendee;
pub mod conference;
pub mod error;
pub mod event;
pub mod event_time;
pub mod reminders;
pub mod serializer;

// Re-export the model types at crate root for convenience
pub use attachment::Attachment;
pub use attendee::{Attendee, ResponseStatus};
pub use conference::ConferenceSolution;
pub use error::{EventError, EventResult};
pub use event::{Event, EventBuilder, Visibility};
pub use event_time::{EventTime, TimeInput, local_timezone, normalize_span};
pub use reminders::{
    DEFAULT_EMAIL_MINUTES, DEFAULT_POPUP_MINUTES, MAX_OVERRIDE_REMINDERS, Reminder,
    ReminderMethod, ReminderSet,
};
pub use serializer::{FromJson, ToJson};
