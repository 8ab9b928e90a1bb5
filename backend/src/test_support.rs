//! Shared helpers for unit tests inside the crate.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Event, EventDraft, EventId, NewEvent, RegisteredUser, UserId};

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Reference "now" used across unit tests.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixture_now()))
}

pub fn event_id(raw: i32) -> EventId {
    EventId::new(raw).expect("positive event id")
}

pub fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("positive user id")
}

/// Event starting `hours_ahead` hours after [`fixture_now`].
pub fn sample_event(id: i32, hours_ahead: i64, capacity: i64) -> Event {
    Event::new(
        event_id(id),
        NewEvent::new(EventDraft {
            title: format!("Event {id}"),
            date_time: fixture_now() + Duration::hours(hours_ahead),
            location: "Main Hall".to_owned(),
            capacity,
        })
        .expect("valid sample event"),
    )
}

pub fn sample_user(id: i64) -> RegisteredUser {
    RegisteredUser {
        id: user_id(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
    }
}
