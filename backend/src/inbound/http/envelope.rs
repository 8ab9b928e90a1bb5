//! JSON envelope shared by every response body.

use serde::Serialize;
use utoipa::ToSchema;

/// Top-level `status` discriminator.
///
/// `fail` marks client errors, `error` marks server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

/// `{status, message}` body used for errors and message-only successes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponseBody {
    pub status: ResponseStatus,
    #[schema(example = "No event found with that ID.")]
    pub message: String,
}

impl MessageResponseBody {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }
}
