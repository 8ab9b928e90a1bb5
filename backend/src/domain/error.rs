//! Domain-level error type.
//!
//! Errors are transport agnostic. Services classify every failure with a
//! closed [`ErrorCode`]; inbound adapters decide how each code is rendered
//! (status codes, envelopes, redaction).

use std::fmt;

use serde_json::{Value, json};

use super::TraceId;

const STORE_SOURCE: &str = "store";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested event, registration, or user does not exist.
    NotFound,
    /// The target is in a state that forbids the operation (e.g. a past event).
    InvalidState,
    /// The event has no remaining capacity.
    CapacityExceeded,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    /// Whether the failure was caused by the caller rather than the server.
    ///
    /// # Examples
    /// ```
    /// use events_backend::domain::ErrorCode;
    ///
    /// assert!(ErrorCode::Conflict.is_client_error());
    /// assert!(!ErrorCode::InternalError.is_client_error());
    /// ```
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::InternalError)
    }
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The message was empty once trimmed.
    EmptyMessage,
    /// The trace identifier was empty once trimmed.
    EmptyTraceId,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
            Self::EmptyTraceId => write!(f, "trace identifier must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `trace_id`, when present, is non-empty.
///
/// # Examples
/// ```
/// use events_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("No event found with that ID.");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope. An empty
    /// message is replaced by a generic description of `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: fallback_message(code).to_owned(),
            trace_id: current_trace_id(),
            details: None,
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: current_trace_id(),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was created.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details, never rendered to clients.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier, keeping the existing one when `id` is blank.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        let id = id.into();
        match self.clone().try_with_trace_id(id) {
            Ok(updated) => updated,
            Err(_) => self,
        }
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(mut self, id: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(id);
        Ok(self)
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use events_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "title" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidState`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Convenience constructor for [`ErrorCode::CapacityExceeded`].
    pub fn capacity_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CapacityExceeded, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Internal error raised by the data store rather than by service code.
    pub fn store_failure(message: impl Into<String>) -> Self {
        Self::internal(message).with_details(json!({ "source": STORE_SOURCE }))
    }

    /// Whether this error originated in the data store.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        self.details
            .as_ref()
            .and_then(|details| details.get("source"))
            .and_then(Value::as_str)
            == Some(STORE_SOURCE)
    }
}

fn current_trace_id() -> Option<String> {
    TraceId::current().map(|id| id.to_string())
}

const fn fallback_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "invalid request",
        ErrorCode::NotFound => "resource not found",
        ErrorCode::InvalidState => "operation not permitted in the current state",
        ErrorCode::CapacityExceeded => "capacity exceeded",
        ErrorCode::Conflict => "conflicting resource",
        ErrorCode::InternalError => "internal error",
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
