use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde_json::{Map, Value};

use crate::attachment::Attachment;
use crate::attendee::{Attendee, ResponseStatus};
use crate::conference::ConferenceSolution;
use crate::error::{EventError, EventResult};
use crate::event::{Event, Visibility};
use crate::event_time::{EventTime, local_timezone};
use crate::reminders::{Reminder, ReminderMethod, ReminderSet};
use crate::serializer::FromJson;

impl Event {
    /// Parse an event from a wire JSON string.
    pub fn from_json_str(s: &str) -> EventResult<Event> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| EventError::MalformedJson(e.to_string()))?;
        Event::from_json(value)
    }
}

impl FromJson for Event {
    fn from_json(value: Value) -> EventResult<Self> {
        let Value::Object(mut obj) = value else {
            return Err(malformed("expected a JSON object"));
        };

        let summary = match obj.remove("summary") {
            Some(Value::String(s)) => s,
            Some(_) => return Err(malformed("'summary' must be a string")),
            None => return Err(malformed("missing 'summary'")),
        };

        let start = EventTime::from_json(require(&mut obj, "start")?)?;
        let end = EventTime::from_json(require(&mut obj, "end")?)?;
        if start.is_date() != end.is_date() {
            return Err(EventError::TimeKindMismatch);
        }

        // All-day events carry no zone on the wire; anchor them locally.
        let timezone = match &start {
            EventTime::Zoned(dt) => dt.timezone(),
            EventTime::Date(_) => local_timezone(),
        };

        let event_id = opt_string(&mut obj, "id")?;
        let description = opt_string(&mut obj, "description")?;
        let location = opt_string(&mut obj, "location")?;
        let color_id = opt_string(&mut obj, "colorId")?;

        let visibility = match opt_string(&mut obj, "visibility")?.as_deref() {
            None | Some("default") => Visibility::Default,
            Some("public") => Visibility::Public,
            Some("private") => Visibility::Private,
            Some(other) => return Err(malformed(&format!("unknown visibility '{other}'"))),
        };

        let recurrence = match obj.remove("recurrence") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(malformed("'recurrence' entries must be strings")),
                })
                .collect::<EventResult<_>>()?,
            Some(_) => return Err(malformed("'recurrence' must be an array")),
        };

        let attendees = match obj.remove("attendees") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(Attendee::from_json)
                .collect::<EventResult<_>>()?,
            Some(_) => return Err(malformed("'attendees' must be an array")),
        };

        let attachments = match obj.remove("attachments") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(Attachment::from_json)
                .collect::<EventResult<_>>()?,
            Some(_) => return Err(malformed("'attachments' must be an array")),
        };

        let conference_solution = match obj.remove("conferenceData") {
            None | Some(Value::Null) => None,
            Some(value) => Some(ConferenceSolution::from_wire(value)),
        };

        let (default_reminders, reminders) = match obj.remove("reminders") {
            None | Some(Value::Null) => (false, ReminderSet::new()),
            Some(Value::Object(mut envelope)) => {
                let use_default = match envelope.remove("useDefault") {
                    None | Some(Value::Null) => false,
                    Some(Value::Bool(b)) => b,
                    Some(_) => return Err(malformed("'reminders.useDefault' must be a boolean")),
                };
                let overrides = match envelope.remove("overrides") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => items
                        .into_iter()
                        .map(Reminder::from_json)
                        .collect::<EventResult<_>>()?,
                    Some(_) => return Err(malformed("'reminders.overrides' must be an array")),
                };
                let set = ReminderSet::from_reminders(overrides)?;
                set.check_default_conflict(use_default)?;
                (use_default, set)
            }
            Some(_) => return Err(malformed("'reminders' must be an object")),
        };

        let updated = match obj.remove("updated") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(
                DateTime::parse_from_rfc3339(&s)
                    .map_err(|e| malformed(&format!("bad 'updated' timestamp '{s}': {e}")))?
                    .with_timezone(&Utc),
            ),
            Some(_) => return Err(malformed("'updated' must be a string")),
        };

        // What remains is unrecognized; keep it verbatim, in document order.
        Ok(Event {
            event_id,
            summary,
            description,
            location,
            start,
            end,
            timezone,
            recurrence,
            color_id,
            visibility,
            attendees,
            attachments,
            conference_solution,
            reminders,
            default_reminders,
            updated,
            other: obj,
        })
    }
}

impl FromJson for EventTime {
    fn from_json(value: Value) -> EventResult<Self> {
        let Value::Object(obj) = value else {
            return Err(malformed("'start'/'end' must be an object"));
        };

        if let Some(date) = obj.get("date") {
            let s = date
                .as_str()
                .ok_or_else(|| malformed("'date' must be a string"))?;
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| malformed(&format!("bad 'date' value '{s}': {e}")))?;
            Ok(EventTime::Date(d))
        } else if let Some(datetime) = obj.get("dateTime") {
            let s = datetime
                .as_str()
                .ok_or_else(|| malformed("'dateTime' must be a string"))?;
            let parsed = DateTime::parse_from_rfc3339(s)
                .map_err(|e| malformed(&format!("bad 'dateTime' value '{s}': {e}")))?;
            let tz = match obj.get("timeZone") {
                None | Some(Value::Null) => Tz::UTC,
                Some(Value::String(name)) => name
                    .parse::<Tz>()
                    .map_err(|_| EventError::UnknownTimezone(name.clone()))?,
                Some(_) => return Err(malformed("'timeZone' must be a string")),
            };
            Ok(EventTime::Zoned(parsed.with_timezone(&tz)))
        } else {
            Err(malformed("'start'/'end' must carry 'date' or 'dateTime'"))
        }
    }
}

impl FromJson for Attendee {
    fn from_json(value: Value) -> EventResult<Self> {
        let Value::Object(mut obj) = value else {
            return Err(malformed("attendee must be an object"));
        };

        let email = match obj.remove("email") {
            Some(Value::String(s)) => s,
            _ => return Err(malformed("attendee must carry a string 'email'")),
        };

        Ok(Attendee {
            email,
            display_name: opt_string(&mut obj, "displayName")?,
            comment: opt_string(&mut obj, "comment")?,
            optional: opt_bool(&mut obj, "optional")?,
            is_resource: opt_bool(&mut obj, "resource")?,
            additional_guests: opt_u32(&mut obj, "additionalGuests")?,
            response_status: opt_string(&mut obj, "responseStatus")?
                .as_deref()
                .and_then(parse_response_status),
            organizer: opt_bool(&mut obj, "organizer")?,
            is_self: opt_bool(&mut obj, "self")?,
        })
    }
}

impl FromJson for Attachment {
    fn from_json(value: Value) -> EventResult<Self> {
        let Value::Object(mut obj) = value else {
            return Err(malformed("attachment must be an object"));
        };

        let title = opt_string(&mut obj, "title")?.unwrap_or_default();
        let file_url = opt_string(&mut obj, "fileUrl")?
            .ok_or_else(|| malformed("attachment must carry a string 'fileUrl'"))?;
        let mime_type = opt_string(&mut obj, "mimeType")?.unwrap_or_default();

        Ok(Attachment {
            title,
            file_url,
            mime_type,
        })
    }
}

impl FromJson for Reminder {
    fn from_json(value: Value) -> EventResult<Self> {
        let Value::Object(mut obj) = value else {
            return Err(malformed("reminder override must be an object"));
        };

        let method = match opt_string(&mut obj, "method")?.as_deref() {
            Some("popup") => ReminderMethod::Popup,
            Some("email") => ReminderMethod::Email,
            Some(other) => return Err(malformed(&format!("unknown reminder method '{other}'"))),
            None => return Err(malformed("reminder override must carry 'method'")),
        };

        let minutes_before_start = opt_u32(&mut obj, "minutes")?
            .ok_or_else(|| malformed("reminder override must carry non-negative 'minutes'"))?;

        Ok(Reminder {
            method,
            minutes_before_start,
        })
    }
}

impl FromJson for ConferenceSolution {
    fn from_json(value: Value) -> EventResult<Self> {
        Ok(ConferenceSolution::from_wire(value))
    }
}

fn malformed(msg: &str) -> EventError {
    EventError::MalformedJson(msg.to_string())
}

fn require(obj: &mut Map<String, Value>, key: &str) -> EventResult<Value> {
    obj.remove(key)
        .ok_or_else(|| malformed(&format!("missing '{key}'")))
}

/// Optional string field; explicit `null` counts as absent.
fn opt_string(obj: &mut Map<String, Value>, key: &str) -> EventResult<Option<String>> {
    match obj.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(malformed(&format!("'{key}' must be a string"))),
    }
}

fn opt_bool(obj: &mut Map<String, Value>, key: &str) -> EventResult<bool> {
    match obj.remove(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(_) => Err(malformed(&format!("'{key}' must be a boolean"))),
    }
}

fn opt_u32(obj: &mut Map<String, Value>, key: &str) -> EventResult<Option<u32>> {
    match obj.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| malformed(&format!("'{key}' must be a non-negative integer"))),
    }
}

fn parse_response_status(s: &str) -> Option<ResponseStatus> {
    match s {
        "needsAction" => Some(ResponseStatus::NeedsAction),
        "declined" => Some(ResponseStatus::Declined),
        "tentative" => Some(ResponseStatus::Tentative),
        "accepted" => Some(ResponseStatus::Accepted),
        _ => None,
    }
}
