//! Event aggregate and its validated building blocks.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::RegisteredUser;
use super::event_stats::EventStats;

/// Largest capacity an event may be created with.
pub const MAX_EVENT_CAPACITY: u16 = 1000;

/// Validation failures raised while building event values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("event id must be a positive integer")]
    InvalidId,
    #[error("event title must not be blank")]
    BlankTitle,
    #[error("event location must not be blank")]
    BlankLocation,
    #[error("capacity {value} must be between 1 and {max}")]
    CapacityOutOfRange { value: i64, max: u16 },
}

/// Store-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(i32);

impl EventId {
    /// Validate a raw identifier. Only positive values can name a row.
    pub fn new(raw: i32) -> Result<Self, EventValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(EventValidationError::InvalidId)
        }
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = EventValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i32>()
            .map_err(|_| EventValidationError::InvalidId)?;
        Self::new(raw)
    }
}

/// Maximum number of registrations an event admits, within `1..=1000`.
///
/// # Examples
/// ```
/// use events_backend::domain::Capacity;
///
/// assert_eq!(Capacity::new(1000).map(Capacity::get), Ok(1000));
/// assert!(Capacity::new(0).is_err());
/// assert!(Capacity::new(1001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capacity(u16);

impl Capacity {
    pub fn new(value: i64) -> Result<Self, EventValidationError> {
        u16::try_from(value)
            .ok()
            .filter(|candidate| (1..=MAX_EVENT_CAPACITY).contains(candidate))
            .map(Self)
            .ok_or(EventValidationError::CapacityOutOfRange {
                value,
                max: MAX_EVENT_CAPACITY,
            })
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Unvalidated input for [`NewEvent::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub capacity: i64,
}

/// Validated event awaiting persistence.
///
/// ## Invariants
/// - `title` and `location` contain at least one non-whitespace character.
/// - `capacity` lies in `1..=MAX_EVENT_CAPACITY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    title: String,
    date_time: DateTime<Utc>,
    location: String,
    capacity: Capacity,
}

impl NewEvent {
    pub fn new(draft: EventDraft) -> Result<Self, EventValidationError> {
        let EventDraft {
            title,
            date_time,
            location,
            capacity,
        } = draft;
        if title.trim().is_empty() {
            return Err(EventValidationError::BlankTitle);
        }
        if location.trim().is_empty() {
            return Err(EventValidationError::BlankLocation);
        }
        Ok(Self {
            title,
            date_time,
            location,
            capacity: Capacity::new(capacity)?,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }
}

/// Persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    details: NewEvent,
}

impl Event {
    /// Attach the store-assigned identifier to validated details.
    #[must_use]
    pub fn new(id: EventId, details: NewEvent) -> Self {
        Self { id, details }
    }

    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.details.title()
    }

    #[must_use]
    pub fn date_time(&self) -> DateTime<Utc> {
        self.details.date_time()
    }

    #[must_use]
    pub fn location(&self) -> &str {
        self.details.location()
    }

    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.details.capacity()
    }

    /// True while the start time is strictly later than `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date_time() > now
    }
}

/// Event together with the users registered for it, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub event: Event,
    pub registered_users: Vec<RegisteredUser>,
}

/// Event together with its current registration count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOccupancy {
    pub event: Event,
    pub registrations: u32,
}

impl EventOccupancy {
    #[must_use]
    pub fn stats(&self) -> EventStats {
        EventStats::from_counts(self.event.capacity().get(), self.registrations)
    }
}
