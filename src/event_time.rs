//! Date-or-datetime representation for event boundaries.
//!
//! The wire format distinguishes all-day events (`{"date": ...}`) from timed
//! events (`{"dateTime": ..., "timeZone": ...}`). `EventTime` carries that
//! distinction as a tagged union so a mixed start/end pair is only
//! representable at the untyped input boundary, never after construction.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

use crate::error::{EventError, EventResult};

/// Start or end of an event: an all-day date or a timezone-aware instant.
/// The wire mapping lives in the serializer; there is no serde derive here
/// because the wire shape is a tagged object, not the enum's natural form.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    Date(NaiveDate),
    Zoned(DateTime<Tz>),
}

impl EventTime {
    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Project to a UTC instant for comparison purposes only.
    /// All-day dates become local midnight in `tz`; returns `None` when
    /// midnight does not exist in that zone (spring-forward gap).
    pub(crate) fn to_instant(&self, tz: Tz) -> Option<DateTime<Utc>> {
        match self {
            EventTime::Date(d) => {
                let midnight = d.and_hms_opt(0, 0, 0).unwrap();
                localize(midnight, tz).ok().map(|dt| dt.with_timezone(&Utc))
            }
            EventTime::Zoned(dt) => Some(dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

/// Untyped date-like input accepted at the construction boundary.
///
/// Naive datetimes are attached to the event's timezone during normalization;
/// aware datetimes are kept as given.
#[derive(Debug, Clone)]
pub enum TimeInput {
    Date(NaiveDate),
    Naive(NaiveDateTime),
    Zoned(DateTime<Tz>),
}

impl TimeInput {
    /// Ergonomic date-literal form, e.g. `TimeInput::ymd(2024, 3, 1)`.
    pub fn ymd(year: i32, month: u32, day: u32) -> EventResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(TimeInput::Date)
            .ok_or_else(|| {
                EventError::InvalidDateTime(format!("{year:04}-{month:02}-{day:02} is not a valid date"))
            })
    }
}

impl From<NaiveDate> for TimeInput {
    fn from(d: NaiveDate) -> Self {
        TimeInput::Date(d)
    }
}

impl From<NaiveDateTime> for TimeInput {
    fn from(dt: NaiveDateTime) -> Self {
        TimeInput::Naive(dt)
    }
}

impl From<DateTime<Tz>> for TimeInput {
    fn from(dt: DateTime<Tz>) -> Self {
        TimeInput::Zoned(dt)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeInput::Zoned(dt.with_timezone(&Tz::UTC))
    }
}

/// Resolve raw start/end inputs into a validated pair.
///
/// - date-only start without an end becomes a 1-day event
/// - time-bearing start without an end becomes a 1-hour event
/// - mixing a date with a datetime fails with `TimeKindMismatch`
pub fn normalize_span(
    start: TimeInput,
    end: Option<TimeInput>,
    tz: Tz,
) -> EventResult<(EventTime, EventTime)> {
    let start = resolve(start, tz)?;

    let end = match end {
        Some(end) => resolve(end, tz)?,
        None => match &start {
            EventTime::Date(d) => EventTime::Date(*d + Duration::days(1)),
            EventTime::Zoned(dt) => EventTime::Zoned(*dt + Duration::hours(1)),
        },
    };

    if start.is_date() != end.is_date() {
        return Err(EventError::TimeKindMismatch);
    }

    Ok((start, end))
}

fn resolve(input: TimeInput, tz: Tz) -> EventResult<EventTime> {
    match input {
        TimeInput::Date(d) => Ok(EventTime::Date(d)),
        TimeInput::Naive(dt) => Ok(EventTime::Zoned(localize(dt, tz)?)),
        TimeInput::Zoned(dt) => Ok(EventTime::Zoned(dt)),
    }
}

/// Attach a naive local time to a timezone. Ambiguous times (fall-back hour)
/// resolve to the earlier offset; nonexistent times (spring-forward gap) fail.
pub(crate) fn localize(naive: NaiveDateTime, tz: Tz) -> EventResult<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => Err(EventError::InvalidDateTime(format!(
            "{naive} does not exist in timezone {tz}"
        ))),
    }
}

/// Host timezone, falling back to UTC when it cannot be determined.
pub fn local_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Offset};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_start_without_end_becomes_one_day_event() {
        let (start, end) =
            normalize_span(date(2024, 1, 1).into(), None, Tz::UTC).unwrap();

        assert_eq!(start, EventTime::Date(date(2024, 1, 1)));
        assert_eq!(end, EventTime::Date(date(2024, 1, 2)));
    }

    #[test]
    fn datetime_start_without_end_becomes_one_hour_event() {
        let start_input = date(2024, 1, 1).and_hms_opt(10, 0, 0).unwrap();
        let tz: Tz = "Europe/Zurich".parse().unwrap();

        let (start, end) = normalize_span(start_input.into(), None, tz).unwrap();

        let expected_start = tz
            .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
            .unwrap();
        assert_eq!(start, EventTime::Zoned(expected_start));
        assert_eq!(end, EventTime::Zoned(expected_start + Duration::hours(1)));
    }

    #[test]
    fn mixed_date_and_datetime_fails() {
        let start = TimeInput::Date(date(2024, 1, 1));
        let end = TimeInput::Naive(date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap());

        let err = normalize_span(start, Some(end), Tz::UTC).unwrap_err();
        assert!(matches!(err, EventError::TimeKindMismatch));
    }

    #[test]
    fn aware_datetime_keeps_its_zone() {
        let paris: Tz = "Europe/Paris".parse().unwrap();
        let start = paris.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        // Normalized under UTC, but the aware input must not be re-localized.
        let (normalized, _) = normalize_span(start.into(), None, Tz::UTC).unwrap();
        assert_eq!(normalized, EventTime::Zoned(start));
    }

    #[test]
    fn ambiguous_local_time_resolves_to_earlier_offset() {
        // 2024-10-27 02:30 happens twice in Berlin (end of DST).
        let berlin: Tz = "Europe/Berlin".parse().unwrap();
        let naive = date(2024, 10, 27).and_hms_opt(2, 30, 0).unwrap();

        let resolved = localize(naive, berlin).unwrap();
        assert_eq!(resolved.offset().fix().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn nonexistent_local_time_fails() {
        // 2024-03-31 02:30 is skipped in Berlin (start of DST).
        let berlin: Tz = "Europe/Berlin".parse().unwrap();
        let naive = date(2024, 3, 31).and_hms_opt(2, 30, 0).unwrap();

        let err = localize(naive, berlin).unwrap_err();
        assert!(matches!(err, EventError::InvalidDateTime(_)));
    }

    #[test]
    fn ymd_literal_rejects_invalid_dates() {
        assert!(TimeInput::ymd(2024, 2, 29).is_ok());
        assert!(TimeInput::ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn date_projects_to_local_midnight_for_ordering() {
        let zurich: Tz = "Europe/Zurich".parse().unwrap();
        let all_day = EventTime::Date(date(2024, 1, 1));
        let timed = EventTime::Zoned(zurich.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());

        let midnight = all_day.to_instant(zurich).unwrap();
        let ten = timed.to_instant(zurich).unwrap();
        assert!(midnight < ten);
    }
}
