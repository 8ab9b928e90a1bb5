//! Registration admission rule.
//!
//! Persistence adapters evaluate [`check_admission`] inside the same
//! transaction that locks the event row and inserts the registration, so the
//! rule sees a consistent count. "Now" is read after the lock is granted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{Event, EventId, UserId};

/// A request to register one user for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationAttempt {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Why an otherwise well-formed registration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationRejection {
    #[error("Cannot register for a past event.")]
    EventStarted,
    #[error("Event is at full capacity.")]
    AtCapacity,
}

/// Decide whether `event`, currently holding `existing` registrations, admits
/// one more at `now`.
///
/// The start-time check runs first, so a full event that has already started
/// reports [`RegistrationRejection::EventStarted`].
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use events_backend::domain::{
///     check_admission, Event, EventDraft, EventId, NewEvent, RegistrationRejection,
/// };
///
/// let now = Utc::now();
/// let event = Event::new(
///     EventId::new(1).expect("id"),
///     NewEvent::new(EventDraft {
///         title: "Meetup".into(),
///         date_time: now + Duration::days(1),
///         location: "Hall".into(),
///         capacity: 1,
///     })
///     .expect("event"),
/// );
/// assert_eq!(check_admission(&event, 0, now), Ok(()));
/// assert_eq!(check_admission(&event, 1, now), Err(RegistrationRejection::AtCapacity));
/// ```
pub fn check_admission(
    event: &Event,
    existing: u32,
    now: DateTime<Utc>,
) -> Result<(), RegistrationRejection> {
    if !event.is_upcoming(now) {
        return Err(RegistrationRejection::EventStarted);
    }
    if existing >= u32::from(event.capacity().get()) {
        return Err(RegistrationRejection::AtCapacity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventDraft, NewEvent};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn event_starting(at: DateTime<Utc>, capacity: i64) -> Event {
        Event::new(
            EventId::new(1).expect("positive id"),
            NewEvent::new(EventDraft {
                title: "Workshop".to_owned(),
                date_time: at,
                location: "Room 4".to_owned(),
                capacity,
            })
            .expect("valid event"),
        )
    }

    #[rstest]
    #[case(0, 10, Ok(()))]
    #[case(9, 10, Ok(()))]
    #[case(10, 10, Err(RegistrationRejection::AtCapacity))]
    #[case(11, 10, Err(RegistrationRejection::AtCapacity))]
    fn capacity_is_a_hard_cap(
        now: DateTime<Utc>,
        #[case] existing: u32,
        #[case] capacity: i64,
        #[case] expected: Result<(), RegistrationRejection>,
    ) {
        let event = event_starting(now + Duration::hours(1), capacity);
        assert_eq!(check_admission(&event, existing, now), expected);
    }

    #[rstest]
    #[case(Duration::zero())]
    #[case(-Duration::minutes(5))]
    fn started_events_refuse_registrations(now: DateTime<Utc>, #[case] offset: Duration) {
        let event = event_starting(now + offset, 10);
        assert_eq!(
            check_admission(&event, 0, now),
            Err(RegistrationRejection::EventStarted)
        );
    }

    #[rstest]
    fn start_time_is_checked_before_capacity(now: DateTime<Utc>) {
        let event = event_starting(now - Duration::days(1), 1);
        assert_eq!(
            check_admission(&event, 1, now),
            Err(RegistrationRejection::EventStarted)
        );
    }

    #[rstest]
    fn rejection_messages_are_client_facing() {
        assert_eq!(
            RegistrationRejection::EventStarted.to_string(),
            "Cannot register for a past event."
        );
        assert_eq!(
            RegistrationRejection::AtCapacity.to_string(),
            "Event is at full capacity."
        );
    }
}
