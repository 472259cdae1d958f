//! Error types for event construction and wire conversion.

use thiserror::Error;

/// Validation failures raised at construction, mutation, or deserialization time.
///
/// All variants are local, synchronous errors: the caller must fix the input and
/// retry the call. Nothing is retried or swallowed internally.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("start and end must either both be dates or both be datetimes")]
    TimeKindMismatch,

    #[error("the maximum number of override reminders is 5")]
    TooManyReminders,

    #[error("cannot specify both default reminders and overrides at the same time")]
    ConflictingReminders,

    #[error("malformed event JSON: {0}")]
    MalformedJson(String),

    #[error("invalid event id '{0}': expected 5-1024 characters in [a-vA-V0-9]")]
    InvalidEventId(String),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("invalid datetime: {0}")]
    InvalidDateTime(String),
}

/// Result type alias for event operations.
pub type EventResult<T> = Result<T, EventError>;
