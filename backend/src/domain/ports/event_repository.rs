//! Driven port for event persistence and read projections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Event, EventDetail, EventId, EventOccupancy, NewEvent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event repository adapters.
    pub enum EventRepositoryError {
        /// The store could not be reached or a connection was lost.
        Connection { message: String } =>
            "event repository connection failed: {message}",
        /// A query failed while executing.
        Query { message: String } =>
            "event repository query failed: {message}",
    }
}

/// Storage operations over events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a validated event and return it with its assigned identifier.
    async fn insert(&self, event: &NewEvent) -> Result<Event, EventRepositoryError>;

    /// Load an event with its registered users ordered by registration time,
    /// then user id.
    async fn find_detail(&self, id: EventId)
    -> Result<Option<EventDetail>, EventRepositoryError>;

    /// Load an event with its registration count.
    async fn find_occupancy(
        &self,
        id: EventId,
    ) -> Result<Option<EventOccupancy>, EventRepositoryError>;

    /// Events starting strictly after `now`, ordered by start time then
    /// location.
    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, EventRepositoryError>;
}
