//! Driving port for event reads.
//!
//! Inbound adapters use this port to fetch event detail, upcoming listings,
//! and occupancy statistics without depending on repository details.

use async_trait::async_trait;

use crate::domain::{Error, Event, EventDetail, EventId, EventStats};

/// Driving port for event read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// Event with its registered users; `NotFound` when absent.
    async fn get_event(&self, id: EventId) -> Result<EventDetail, Error>;

    /// Events that have not started yet, soonest first.
    async fn list_upcoming(&self) -> Result<Vec<Event>, Error>;

    /// Occupancy statistics; `NotFound` when the event is absent.
    async fn get_stats(&self, id: EventId) -> Result<EventStats, Error>;
}
