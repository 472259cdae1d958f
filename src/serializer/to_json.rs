use serde_json::{Map, Value, json};

use crate::attachment::Attachment;
use crate::attendee::{Attendee, ResponseStatus};
use crate::conference::ConferenceSolution;
use crate::event::Event;
use crate::event_time::EventTime;
use crate::reminders::{Reminder, ReminderMethod};
use crate::serializer::{RECOGNIZED_KEYS, ToJson};

impl ToJson for Event {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();

        if let Some(id) = &self.event_id {
            obj.insert("id".to_string(), json!(id));
        }
        obj.insert("summary".to_string(), json!(self.summary));
        if let Some(description) = &self.description {
            obj.insert("description".to_string(), json!(description));
        }
        if let Some(location) = &self.location {
            obj.insert("location".to_string(), json!(location));
        }
        obj.insert("start".to_string(), self.start.to_json());
        obj.insert("end".to_string(), self.end.to_json());
        if !self.recurrence.is_empty() {
            obj.insert("recurrence".to_string(), json!(self.recurrence));
        }
        if let Some(color_id) = &self.color_id {
            obj.insert("colorId".to_string(), json!(color_id));
        }
        obj.insert("visibility".to_string(), json!(self.visibility.as_str()));
        if !self.attendees.is_empty() {
            let attendees: Vec<Value> = self.attendees.iter().map(ToJson::to_json).collect();
            obj.insert("attendees".to_string(), Value::Array(attendees));
        }
        if !self.attachments.is_empty() {
            let attachments: Vec<Value> = self.attachments.iter().map(ToJson::to_json).collect();
            obj.insert("attachments".to_string(), Value::Array(attachments));
        }
        if let Some(conference) = &self.conference_solution {
            obj.insert("conferenceData".to_string(), conference.to_json());
        }
        let overrides: Vec<Value> = self.reminders.iter().map(ToJson::to_json).collect();
        obj.insert(
            "reminders".to_string(),
            json!({
                "useDefault": self.default_reminders,
                "overrides": overrides,
            }),
        );

        // `updated` is server-owned and never sent back.

        for (key, value) in &self.other {
            if !RECOGNIZED_KEYS.contains(&key.as_str()) {
                obj.insert(key.clone(), value.clone());
            }
        }

        Value::Object(obj)
    }
}

impl ToJson for EventTime {
    fn to_json(&self) -> Value {
        match self {
            EventTime::Date(d) => json!({ "date": d.format("%Y-%m-%d").to_string() }),
            EventTime::Zoned(dt) => json!({
                "dateTime": dt.to_rfc3339(),
                "timeZone": dt.timezone().name(),
            }),
        }
    }
}

impl ToJson for Attendee {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();

        obj.insert("email".to_string(), json!(self.email));
        if let Some(display_name) = &self.display_name {
            obj.insert("displayName".to_string(), json!(display_name));
        }
        if let Some(comment) = &self.comment {
            obj.insert("comment".to_string(), json!(comment));
        }
        // False flags stay absent, the service's own default.
        if self.optional {
            obj.insert("optional".to_string(), json!(true));
        }
        if self.is_resource {
            obj.insert("resource".to_string(), json!(true));
        }
        if let Some(additional_guests) = self.additional_guests {
            obj.insert("additionalGuests".to_string(), json!(additional_guests));
        }
        if let Some(status) = self.response_status {
            obj.insert("responseStatus".to_string(), json!(response_status_str(status)));
        }
        if self.organizer {
            obj.insert("organizer".to_string(), json!(true));
        }
        if self.is_self {
            obj.insert("self".to_string(), json!(true));
        }

        Value::Object(obj)
    }
}

impl ToJson for Attachment {
    fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "fileUrl": self.file_url,
            "mimeType": self.mime_type,
        })
    }
}

impl ToJson for Reminder {
    fn to_json(&self) -> Value {
        let method = match self.method {
            ReminderMethod::Popup => "popup",
            ReminderMethod::Email => "email",
        };
        json!({
            "method": method,
            "minutes": self.minutes_before_start,
        })
    }
}

impl ToJson for ConferenceSolution {
    fn to_json(&self) -> Value {
        self.as_value().clone()
    }
}

fn response_status_str(status: ResponseStatus) -> &'static str {
    match status {
        ResponseStatus::NeedsAction => "needsAction",
        ResponseStatus::Declined => "declined",
        ResponseStatus::Tentative => "tentative",
        ResponseStatus::Accepted => "accepted",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Tz;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn all_day_event_serializes_to_date_objects() {
        let event = Event::builder("Meeting", date(2024, 3, 1))
            .end(date(2024, 3, 2))
            .build()
            .unwrap();

        let json = event.to_json();

        assert_eq!(json["summary"], "Meeting");
        assert_eq!(json["start"], json!({ "date": "2024-03-01" }));
        assert_eq!(json["end"], json!({ "date": "2024-03-02" }));
        assert_eq!(json["visibility"], "default");
        assert_eq!(
            json["reminders"],
            json!({ "useDefault": false, "overrides": [] })
        );
    }

    #[test]
    fn timed_event_carries_datetime_and_zone() {
        let tz: Tz = "Europe/Paris".parse().unwrap();
        let event = Event::builder("Call", date(2024, 6, 1).and_hms_opt(14, 0, 0).unwrap())
            .timezone(tz)
            .build()
            .unwrap();

        let json = event.to_json();

        assert_eq!(json["start"]["dateTime"], "2024-06-01T14:00:00+02:00");
        assert_eq!(json["start"]["timeZone"], "Europe/Paris");
        assert_eq!(json["end"]["dateTime"], "2024-06-01T15:00:00+02:00");
    }

    #[test]
    fn absent_optionals_are_omitted_not_null() {
        let event = Event::new("Meeting", date(2024, 3, 1)).unwrap();
        let json = event.to_json();
        let obj = json.as_object().unwrap();

        for key in ["id", "description", "location", "recurrence", "colorId",
                    "attendees", "attachments", "conferenceData", "updated"] {
            assert!(!obj.contains_key(key), "unexpected key {key}");
        }
        assert!(!obj.values().any(Value::is_null));
    }

    #[test]
    fn minimal_attendee_emits_only_email() {
        let json = Attendee::new("alice@example.com").to_json();
        assert_eq!(json, json!({ "email": "alice@example.com" }));
    }

    #[test]
    fn passthrough_fields_merge_without_shadowing() {
        let event = Event::builder("Meeting", date(2024, 3, 1))
            .other("transparency", json!("transparent"))
            .other("summary", json!("injected"))
            .build()
            .unwrap();

        let json = event.to_json();

        assert_eq!(json["transparency"], "transparent");
        assert_eq!(json["summary"], "Meeting");
    }

    #[test]
    fn reminder_overrides_use_wire_field_names() {
        let event = Event::builder("Meeting", date(2024, 3, 1))
            .reminder(Reminder::popup(10))
            .reminder(Reminder::email(60))
            .build()
            .unwrap();

        assert_eq!(
            event.to_json()["reminders"],
            json!({
                "useDefault": false,
                "overrides": [
                    { "method": "popup", "minutes": 10 },
                    { "method": "email", "minutes": 60 },
                ],
            })
        );
    }
}
