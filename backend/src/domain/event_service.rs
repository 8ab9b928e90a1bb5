//! Event domain services.
//!
//! These services implement the event driving ports on top of an
//! [`EventRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateEventRequest, CreateEventResponse, EventCommand, EventQuery, EventRepository,
    EventRepositoryError,
};
use crate::domain::{Error, Event, EventDetail, EventId, EventStats};

pub(crate) const EVENT_NOT_FOUND: &str = "No event found with that ID.";

fn map_repository_error(error: EventRepositoryError) -> Error {
    match error {
        EventRepositoryError::Connection { message } => {
            Error::store_failure(format!("event repository unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::store_failure(format!("event repository error: {message}"))
        }
    }
}

/// Event service implementing [`EventCommand`].
#[derive(Clone)]
pub struct EventCommandService<R> {
    event_repo: Arc<R>,
}

impl<R> EventCommandService<R> {
    pub fn new(event_repo: Arc<R>) -> Self {
        Self { event_repo }
    }
}

#[async_trait]
impl<R> EventCommand for EventCommandService<R>
where
    R: EventRepository,
{
    async fn create_event(
        &self,
        request: CreateEventRequest,
    ) -> Result<CreateEventResponse, Error> {
        let event = self
            .event_repo
            .insert(&request.event)
            .await
            .map_err(map_repository_error)?;
        info!(
            event_id = event.id().get(),
            capacity = event.capacity().get(),
            "event created"
        );
        Ok(CreateEventResponse { event })
    }
}

/// Event service implementing [`EventQuery`].
///
/// The clock decides which events count as upcoming.
#[derive(Clone)]
pub struct EventQueryService<R> {
    event_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EventQueryService<R> {
    pub fn new(event_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { event_repo, clock }
    }
}

#[async_trait]
impl<R> EventQuery for EventQueryService<R>
where
    R: EventRepository,
{
    async fn get_event(&self, id: EventId) -> Result<EventDetail, Error> {
        self.event_repo
            .find_detail(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))
    }

    async fn list_upcoming(&self) -> Result<Vec<Event>, Error> {
        let now = self.clock.utc();
        self.event_repo
            .list_upcoming(now)
            .await
            .map_err(map_repository_error)
    }

    async fn get_stats(&self, id: EventId) -> Result<EventStats, Error> {
        let occupancy = self
            .event_repo
            .find_occupancy(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))?;
        Ok(occupancy.stats())
    }
}

#[cfg(test)]
#[path = "event_service_tests.rs"]
mod tests;
