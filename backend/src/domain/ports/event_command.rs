//! Driving port for event creation.

use async_trait::async_trait;

use crate::domain::{Error, Event, NewEvent};

/// Request to create one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    pub event: NewEvent,
}

/// The event as stored, including its assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventResponse {
    pub event: Event,
}

/// Driving port for event mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCommand: Send + Sync {
    /// Persist a new event.
    async fn create_event(&self, request: CreateEventRequest)
    -> Result<CreateEventResponse, Error>;
}
