//! Registration domain service.
//!
//! Hands each attempt to the repository, which evaluates the admission rule
//! inside its transaction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::event_service::EVENT_NOT_FOUND;
use crate::domain::ports::{
    RegistrationCommand, RegistrationRepository, RegistrationRepositoryError, RegistrationRequest,
};
use crate::domain::{Error, RegistrationAttempt, RegistrationRejection};

const USER_NOT_FOUND: &str = "No user found with that ID.";
const REGISTRATION_NOT_FOUND: &str =
    "Record not found. The user might not have been registered for this event.";

fn map_repository_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::EventNotFound { .. } => Error::not_found(EVENT_NOT_FOUND),
        RegistrationRepositoryError::UserNotFound { .. } => Error::not_found(USER_NOT_FOUND),
        RegistrationRepositoryError::Rejected { reason } => match reason {
            RegistrationRejection::EventStarted => Error::invalid_state(reason.to_string()),
            RegistrationRejection::AtCapacity => Error::capacity_exceeded(reason.to_string()),
        },
        RegistrationRepositoryError::Duplicate { fields } => Error::conflict(format!(
            "Duplicate field value: {fields}. This user is likely already registered for this event."
        )),
        RegistrationRepositoryError::NotRegistered { .. } => {
            Error::not_found(REGISTRATION_NOT_FOUND)
        }
        RegistrationRepositoryError::Connection { message } => {
            Error::store_failure(format!("registration repository unavailable: {message}"))
        }
        RegistrationRepositoryError::Query { message } => {
            Error::store_failure(format!("registration repository error: {message}"))
        }
    }
}

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<R> {
    registration_repo: Arc<R>,
}

impl<R> RegistrationService<R> {
    pub fn new(registration_repo: Arc<R>) -> Self {
        Self { registration_repo }
    }
}

#[async_trait]
impl<R> RegistrationCommand for RegistrationService<R>
where
    R: RegistrationRepository,
{
    async fn register(&self, request: RegistrationRequest) -> Result<(), Error> {
        let attempt = RegistrationAttempt {
            event_id: request.event_id,
            user_id: request.user_id,
        };
        self.registration_repo
            .register(&attempt)
            .await
            .map_err(map_repository_error)?;
        info!(
            event_id = request.event_id.get(),
            user_id = request.user_id.get(),
            "user registered for event"
        );
        Ok(())
    }

    async fn cancel(&self, request: RegistrationRequest) -> Result<(), Error> {
        self.registration_repo
            .cancel(request.event_id, request.user_id)
            .await
            .map_err(map_repository_error)?;
        info!(
            event_id = request.event_id.get(),
            user_id = request.user_id.get(),
            "registration cancelled"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
