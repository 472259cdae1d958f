//! Override reminders with the service's per-event cap.

use serde::{Deserialize, Serialize};

use crate::error::{EventError, EventResult};

/// The service rejects more than 5 override reminders per event.
pub const MAX_OVERRIDE_REMINDERS: usize = 5;

/// Lead time used by `add_popup_reminder` when none is given.
pub const DEFAULT_POPUP_MINUTES: u32 = 30;

/// Lead time used by `add_email_reminder` when none is given.
pub const DEFAULT_EMAIL_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderMethod {
    Popup,
    Email,
}

/// A reminder explicitly attached to one event, overriding the calendar's
/// default reminder set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub method: ReminderMethod,
    pub minutes_before_start: u32,
}

impl Reminder {
    pub fn popup(minutes_before_start: u32) -> Self {
        Reminder {
            method: ReminderMethod::Popup,
            minutes_before_start,
        }
    }

    pub fn email(minutes_before_start: u32) -> Self {
        Reminder {
            method: ReminderMethod::Email,
            minutes_before_start,
        }
    }
}

/// Ordered override reminders. Duplicates are allowed and insertion order is
/// preserved; the only constraint is the 5-item cap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReminderSet(Vec<Reminder>);

impl ReminderSet {
    pub fn new() -> Self {
        ReminderSet(Vec::new())
    }

    /// Bulk construction; fails when more than 5 reminders are supplied at once.
    pub fn from_reminders(reminders: Vec<Reminder>) -> EventResult<Self> {
        if reminders.len() > MAX_OVERRIDE_REMINDERS {
            return Err(EventError::TooManyReminders);
        }
        Ok(ReminderSet(reminders))
    }

    /// Append a reminder; fails when the set already holds 5.
    pub fn add(&mut self, reminder: Reminder) -> EventResult<()> {
        if self.0.len() >= MAX_OVERRIDE_REMINDERS {
            return Err(EventError::TooManyReminders);
        }
        self.0.push(reminder);
        Ok(())
    }

    /// Overrides cannot coexist with the calendar's default reminders.
    pub fn check_default_conflict(&self, default_reminders: bool) -> EventResult<()> {
        if default_reminders && !self.0.is_empty() {
            return Err(EventError::ConflictingReminders);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reminder> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Reminder] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ReminderSet {
    type Item = &'a Reminder;
    type IntoIter = std::slice::Iter<'a, Reminder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_reminders_at_once_is_rejected() {
        let reminders = vec![Reminder::popup(10); 6];

        let err = ReminderSet::from_reminders(reminders).unwrap_err();
        assert!(matches!(err, EventError::TooManyReminders));
    }

    #[test]
    fn add_fails_only_once_full() {
        let mut set = ReminderSet::from_reminders(vec![Reminder::popup(10); 4]).unwrap();

        set.add(Reminder::email(15)).unwrap();
        assert_eq!(set.len(), 5);

        let err = set.add(Reminder::popup(5)).unwrap_err();
        assert!(matches!(err, EventError::TooManyReminders));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn duplicates_are_kept_in_insertion_order() {
        let mut set = ReminderSet::new();
        set.add(Reminder::popup(10)).unwrap();
        set.add(Reminder::popup(10)).unwrap();
        set.add(Reminder::email(60)).unwrap();

        assert_eq!(
            set.as_slice(),
            &[Reminder::popup(10), Reminder::popup(10), Reminder::email(60)]
        );
    }

    #[test]
    fn default_reminders_conflict_with_overrides() {
        let set = ReminderSet::from_reminders(vec![Reminder::popup(10)]).unwrap();

        let err = set.check_default_conflict(true).unwrap_err();
        assert!(matches!(err, EventError::ConflictingReminders));

        set.check_default_conflict(false).unwrap();
        ReminderSet::new().check_default_conflict(true).unwrap();
    }
}
