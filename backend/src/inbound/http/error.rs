//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning domain
//! failures into `{status, message}` bodies with consistent status codes.
//! Server-side failures are logged in full and redacted before rendering.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::envelope::{MessageResponseBody, ResponseStatus};
use crate::inbound::http::validation::malformed_body_error;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const STORE_FAILURE_MESSAGE: &str = "An internal database error occurred.";
pub(crate) const UNEXPECTED_FAILURE_MESSAGE: &str =
    "An unexpected internal server error occurred.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidState | ErrorCode::CapacityExceeded => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn response_status_for(code: ErrorCode) -> ResponseStatus {
    if code.is_client_error() {
        ResponseStatus::Fail
    } else {
        ResponseStatus::Error
    }
}

/// Message safe to show the caller.
fn client_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError if error.is_store_failure() => STORE_FAILURE_MESSAGE,
        ErrorCode::InternalError => UNEXPECTED_FAILURE_MESSAGE,
        _ => error.message(),
    }
}

impl From<&Error> for MessageResponseBody {
    fn from(error: &Error) -> Self {
        Self {
            status: response_status_for(error.code()),
            message: client_message(error).to_owned(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if !self.code().is_client_error() {
            error!(
                code = ?self.code(),
                message = %self.message(),
                trace_id = self.trace_id().unwrap_or_default(),
                details = ?self.details(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(MessageResponseBody::from(self))
    }
}

/// `JsonConfig` error handler turning body extraction failures into
/// validation errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed_body_error(err).into()
}
