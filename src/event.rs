//! The event aggregate: construction, validation, mutation, comparison.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::attachment::Attachment;
use crate::attendee::Attendee;
use crate::conference::ConferenceSolution;
use crate::error::{EventError, EventResult};
use crate::event_time::{EventTime, TimeInput, local_timezone, normalize_span};
use crate::reminders::{
    DEFAULT_EMAIL_MINUTES, DEFAULT_POPUP_MINUTES, Reminder, ReminderSet,
};

/// Visibility of the event to other readers of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// The calendar's default visibility for events.
    #[default]
    Default,
    /// Event details are visible to all readers of the calendar.
    Public,
    /// Only attendees may view event details.
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Default => "default",
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// A calendar event.
///
/// Constructed client-side through [`Event::builder`] (no id) or deserialized
/// from a server response (has `event_id` and `updated`). Start and end are
/// guaranteed to be the same kind: both all-day dates or both zoned instants.
#[derive(Debug, Clone)]
pub struct Event {
    /// Opaque identifier, assigned by the server when absent.
    pub event_id: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    /// Zone used to localize naive inputs and to anchor all-day dates when
    /// ordering events.
    pub timezone: Tz,
    /// RRULE/RDATE/EXRULE/EXDATE strings, passed through verbatim.
    pub recurrence: Vec<String>,
    pub color_id: Option<String>,
    pub visibility: Visibility,
    pub attendees: Vec<Attendee>,
    pub attachments: Vec<Attachment>,
    pub conference_solution: Option<ConferenceSolution>,
    pub reminders: ReminderSet,
    /// Whether the calendar's default reminders apply; mutually exclusive
    /// with a non-empty `reminders` set.
    pub default_reminders: bool,
    /// Last modification time. Server-owned, never sent by the client.
    pub updated: Option<DateTime<Utc>>,
    /// Unrecognized wire fields, re-emitted verbatim on serialization.
    pub other: Map<String, Value>,
}

impl Event {
    /// Start building an event with the two required fields.
    pub fn builder(summary: impl Into<String>, start: impl Into<TimeInput>) -> EventBuilder {
        EventBuilder {
            summary: summary.into(),
            start: start.into(),
            end: None,
            timezone: None,
            event_id: None,
            description: None,
            location: None,
            recurrence: Vec::new(),
            color_id: None,
            visibility: Visibility::Default,
            attendees: Vec::new(),
            attachments: Vec::new(),
            conference_solution: None,
            reminders: Vec::new(),
            default_reminders: false,
            popup_reminder_minutes: None,
            email_reminder_minutes: None,
            other: Map::new(),
        }
    }

    /// Shorthand for a fully-defaulted event.
    pub fn new(summary: impl Into<String>, start: impl Into<TimeInput>) -> EventResult<Self> {
        Event::builder(summary, start).build()
    }

    pub fn id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    /// Append an attendee; a bare email string becomes a minimal record.
    pub fn add_attendee(&mut self, attendee: impl Into<Attendee>) {
        self.attendees.push(attendee.into());
    }

    pub fn add_attachment(
        &mut self,
        file_url: impl Into<String>,
        title: impl Into<String>,
        mime_type: impl Into<String>,
    ) {
        self.attachments.push(Attachment::new(file_url, title, mime_type));
    }

    /// Append an override reminder; fails once the event holds 5.
    pub fn add_reminder(&mut self, reminder: Reminder) -> EventResult<()> {
        self.reminders.add(reminder)
    }

    /// Append a popup reminder; `None` means the default 30-minute lead time.
    pub fn add_popup_reminder(&mut self, minutes_before_start: Option<u32>) -> EventResult<()> {
        self.add_reminder(Reminder::popup(
            minutes_before_start.unwrap_or(DEFAULT_POPUP_MINUTES),
        ))
    }

    /// Append an email reminder; `None` means the default 60-minute lead time.
    pub fn add_email_reminder(&mut self, minutes_before_start: Option<u32>) -> EventResult<()> {
        self.add_reminder(Reminder::email(
            minutes_before_start.unwrap_or(DEFAULT_EMAIL_MINUTES),
        ))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.summary)
    }
}

/// Field-based equality. `updated` is volatile and server-owned, so it is
/// excluded; `timezone` and `conference_solution` are presentation/pass-through
/// concerns and do not participate either. Ids do: two otherwise-identical
/// events with different ids are unequal.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.event_id == other.event_id
            && self.summary == other.summary
            && self.description == other.description
            && self.location == other.location
            && self.recurrence == other.recurrence
            && self.color_id == other.color_id
            && self.visibility == other.visibility
            && self.attendees == other.attendees
            && self.attachments == other.attachments
            && self.reminders == other.reminders
            && self.default_reminders == other.default_reminders
            && self.other == other.other
    }
}

/// Scheduling order: by `(start, end)`, with all-day dates anchored at local
/// midnight in each event's own timezone so all-day and timed events sort
/// consistently. Returns `None` only when midnight does not exist in the
/// event's zone.
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let key = (
            self.start.to_instant(self.timezone)?,
            self.end.to_instant(self.timezone)?,
        );
        let other_key = (
            other.start.to_instant(other.timezone)?,
            other.end.to_instant(other.timezone)?,
        );
        key.partial_cmp(&other_key)
    }
}

/// Builder for [`Event`]. All validation runs in [`EventBuilder::build`].
#[derive(Debug, Clone)]
pub struct EventBuilder {
    summary: String,
    start: TimeInput,
    end: Option<TimeInput>,
    timezone: Option<Tz>,
    event_id: Option<String>,
    description: Option<String>,
    location: Option<String>,
    recurrence: Vec<String>,
    color_id: Option<String>,
    visibility: Visibility,
    attendees: Vec<Attendee>,
    attachments: Vec<Attachment>,
    conference_solution: Option<ConferenceSolution>,
    reminders: Vec<Reminder>,
    default_reminders: bool,
    popup_reminder_minutes: Option<u32>,
    email_reminder_minutes: Option<u32>,
    other: Map<String, Value>,
}

impl EventBuilder {
    pub fn end(mut self, end: impl Into<TimeInput>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// IANA zone used to localize naive datetimes. Defaults to the host's
    /// zone, or UTC when that cannot be determined.
    pub fn timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Client-supplied id; must be 5-1024 characters in `[a-vA-V0-9]`.
    pub fn event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn recurrence_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurrence.push(rule.into());
        self
    }

    pub fn recurrence(mut self, rules: impl IntoIterator<Item = String>) -> Self {
        self.recurrence.extend(rules);
        self
    }

    pub fn color_id(mut self, color_id: impl Into<String>) -> Self {
        self.color_id = Some(color_id.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn attendee(mut self, attendee: impl Into<Attendee>) -> Self {
        self.attendees.push(attendee.into());
        self
    }

    pub fn attendees<A: Into<Attendee>>(mut self, attendees: impl IntoIterator<Item = A>) -> Self {
        self.attendees.extend(attendees.into_iter().map(Into::into));
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    pub fn conference_solution(mut self, conference: ConferenceSolution) -> Self {
        self.conference_solution = Some(conference);
        self
    }

    pub fn reminder(mut self, reminder: Reminder) -> Self {
        self.reminders.push(reminder);
        self
    }

    pub fn reminders(mut self, reminders: impl IntoIterator<Item = Reminder>) -> Self {
        self.reminders.extend(reminders);
        self
    }

    /// Use the calendar's default reminders instead of overrides.
    pub fn default_reminders(mut self, default_reminders: bool) -> Self {
        self.default_reminders = default_reminders;
        self
    }

    /// Shortcut for a popup reminder; added through the capped path at build time.
    pub fn popup_reminder(mut self, minutes_before_start: u32) -> Self {
        self.popup_reminder_minutes = Some(minutes_before_start);
        self
    }

    /// Shortcut for an email reminder; added through the capped path at build time.
    pub fn email_reminder(mut self, minutes_before_start: u32) -> Self {
        self.email_reminder_minutes = Some(minutes_before_start);
        self
    }

    /// Extra wire field, stored verbatim in `other` and re-emitted unchanged.
    pub fn other(mut self, key: impl Into<String>, value: Value) -> Self {
        self.other.insert(key.into(), value);
        self
    }

    pub fn build(self) -> EventResult<Event> {
        let timezone = self.timezone.unwrap_or_else(local_timezone);
        let (start, end) = normalize_span(self.start, self.end, timezone)?;

        if let Some(id) = &self.event_id {
            validate_event_id(id)?;
        }

        let reminders = ReminderSet::from_reminders(self.reminders)?;
        reminders.check_default_conflict(self.default_reminders)?;

        let mut event = Event {
            event_id: self.event_id,
            summary: self.summary,
            description: self.description,
            location: self.location,
            start,
            end,
            timezone,
            recurrence: self.recurrence,
            color_id: self.color_id,
            visibility: self.visibility,
            attendees: self.attendees,
            attachments: self.attachments,
            conference_solution: self.conference_solution,
            reminders,
            default_reminders: self.default_reminders,
            updated: None,
            other: self.other,
        };

        // Shortcuts go through add_reminder, so the 5-item cap still applies.
        if let Some(minutes) = self.popup_reminder_minutes {
            event.add_popup_reminder(Some(minutes))?;
        }
        if let Some(minutes) = self.email_reminder_minutes {
            event.add_email_reminder(Some(minutes))?;
        }

        Ok(event)
    }
}

fn validate_event_id(id: &str) -> EventResult<()> {
    let valid_chars = id
        .chars()
        .all(|c| matches!(c, 'a'..='v' | 'A'..='V' | '0'..='9'));

    if id.len() < 5 || id.len() > 1024 || !valid_chars {
        return Err(EventError::InvalidEventId(id.to_string()));
    }
    Ok(())
}
