//! Driving port for registering and cancelling attendance.

use async_trait::async_trait;

use crate::domain::{Error, EventId, UserId};

/// Identifies one user's registration for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Driving port for registration mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Register the user, enforcing start time, capacity, and uniqueness.
    async fn register(&self, request: RegistrationRequest) -> Result<(), Error>;

    /// Cancel an existing registration.
    async fn cancel(&self, request: RegistrationRequest) -> Result<(), Error>;
}
