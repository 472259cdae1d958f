//! Event attendee records.

use serde::{Deserialize, Serialize};

/// An event attendee.
///
/// Everywhere an attendee is accepted, a bare email string works too: the
/// `From<&str>` / `From<String>` impls wrap it into a record with only the
/// email populated and every other field absent or false.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
    pub display_name: Option<String>,
    pub comment: Option<String>,
    /// Whether attendance is optional.
    pub optional: bool,
    /// Whether the attendee is a resource (e.g. a meeting room).
    pub is_resource: bool,
    pub additional_guests: Option<u32>,
    pub response_status: Option<ResponseStatus>,
    /// Server-populated: whether this attendee organizes the event.
    pub organizer: bool,
    /// Server-populated: whether this entry is the authenticated user.
    pub is_self: bool,
}

impl Attendee {
    pub fn new(email: impl Into<String>) -> Self {
        Attendee {
            email: email.into(),
            ..Default::default()
        }
    }
}

impl From<&str> for Attendee {
    fn from(email: &str) -> Self {
        Attendee::new(email)
    }
}

impl From<String> for Attendee {
    fn from(email: String) -> Self {
        Attendee::new(email)
    }
}

/// Attendee's response to the event invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    NeedsAction,
    Declined,
    Tentative,
    Accepted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_string_coerces_to_minimal_attendee() {
        let attendee: Attendee = "alice@example.com".into();

        assert_eq!(attendee.email, "alice@example.com");
        assert_eq!(attendee.display_name, None);
        assert_eq!(attendee.comment, None);
        assert!(!attendee.optional);
        assert!(!attendee.is_resource);
        assert_eq!(attendee.additional_guests, None);
        assert_eq!(attendee.response_status, None);
        assert!(!attendee.organizer);
        assert!(!attendee.is_self);
    }

    #[test]
    fn coerced_attendee_equals_explicit_record() {
        let from_email: Attendee = "bob@example.com".into();
        let explicit = Attendee::new("bob@example.com");

        assert_eq!(from_email, explicit);
    }
}
