//! Driven port for the registration unit of work.
//!
//! Adapters must run [`RegistrationRepository::register`] as a single
//! transaction: lock the event, evaluate
//! [`check_admission`](crate::domain::check_admission) against the locked row
//! and a fresh count, then insert. Any refusal rolls the transaction back.

use async_trait::async_trait;

use crate::domain::{EventId, RegistrationAttempt, RegistrationRejection, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registration repository adapters.
    pub enum RegistrationRepositoryError {
        /// The event does not exist.
        EventNotFound { event_id: i32 } => "event {event_id} does not exist",
        /// The user reference did not resolve.
        UserNotFound { user_id: i32 } => "user {user_id} does not exist",
        /// The admission rule refused the registration.
        Rejected { reason: RegistrationRejection } => "registration refused: {reason}",
        /// A uniqueness constraint rejected the insert.
        Duplicate { fields: String } => "duplicate registration on ({fields})",
        /// No registration exists for the pair being cancelled.
        NotRegistered { event_id: i32, user_id: i32 } =>
            "user {user_id} is not registered for event {event_id}",
        /// The store could not be reached or a connection was lost.
        Connection { message: String } =>
            "registration repository connection failed: {message}",
        /// A query failed while executing.
        Query { message: String } =>
            "registration repository query failed: {message}",
    }
}

impl From<RegistrationRejection> for RegistrationRepositoryError {
    fn from(reason: RegistrationRejection) -> Self {
        Self::rejected(reason)
    }
}

/// Transactional writes over registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Atomically admit and record a registration.
    async fn register(&self, attempt: &RegistrationAttempt)
    -> Result<(), RegistrationRepositoryError>;

    /// Remove the registration for `(event_id, user_id)`.
    ///
    /// Returns [`RegistrationRepositoryError::NotRegistered`] when nothing was
    /// deleted.
    async fn cancel(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<(), RegistrationRepositoryError>;
}
