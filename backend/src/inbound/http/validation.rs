//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as loosely typed JSON so that missing, empty, and
//! mistyped fields produce the same client-facing messages regardless of how
//! the payload was malformed. Every failure is an
//! [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
//! carrying `{field, code}` details for logs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Value, json};

use crate::domain::{Error, EventId, MAX_EVENT_CAPACITY, UserId};

pub(crate) const REQUIRED_EVENT_FIELDS: &str =
    "Please provide all required fields: title, dateTime, location, capacity.";
pub(crate) const INVALID_CAPACITY: &str =
    "Capacity must be a positive integer less than or equal to 1000.";
pub(crate) const INVALID_DATE_TIME: &str = "Invalid ISO format for dateTime.";
pub(crate) const USER_ID_REQUIRED_FOR_REGISTRATION: &str = "User ID is required for registration.";
pub(crate) const USER_ID_REQUIRED_FOR_CANCELLATION: &str =
    "User ID is required to cancel a registration.";
pub(crate) const INVALID_USER_ID: &str = "User ID must be a positive integer.";
pub(crate) const INVALID_EVENT_ID: &str = "Event ID must be a positive integer.";
pub(crate) const INVALID_JSON_BODY: &str = "Request body must be valid JSON.";

const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Validation error codes attached to request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidCapacity,
    InvalidTimestamp,
    InvalidIdentifier,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidCapacity => "invalid_capacity",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn validation_error(message: &str, field: FieldName, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(INVALID_JSON_BODY).with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
        "reason": reason.to_string(),
    }))
}

/// Whether a JSON value counts as "not provided": absent, `null`, `false`,
/// zero, or a blank string.
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::Array(_) | Value::Object(_) | Value::Bool(true)) => false,
    }
}

/// Keep a value only when it is not blank.
pub(crate) fn provided(value: Option<Value>) -> Option<Value> {
    value.filter(|inner| !is_blank(Some(inner)))
}

/// Extract a non-blank string, or `None` when the value is blank or not text.
pub(crate) fn non_blank_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

/// Interpret a JSON number as an integer. Numbers with a zero fractional part
/// (`5.0`) count; strings never do.
pub(crate) fn json_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    let float = number.as_f64()?;
    if float.fract().abs() > 0.0 || float.abs() > MAX_EXACT_FLOAT_INTEGER {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float is integral and within the exactly representable range"
    )]
    let integer = float as i64;
    Some(integer)
}

/// Validate the event capacity field.
pub(crate) fn parse_capacity(value: &Value, field: FieldName) -> Result<i64, Error> {
    json_integer(value)
        .filter(|capacity| (1..=i64::from(MAX_EVENT_CAPACITY)).contains(capacity))
        .ok_or_else(|| validation_error(INVALID_CAPACITY, field, ValidationCode::InvalidCapacity))
}

/// Parse an event start time.
///
/// Accepts RFC 3339 with an offset, a naive date-time separated by `T` or a
/// space (read as UTC, seconds and fraction optional), or a bare date (UTC
/// midnight).
pub(crate) fn parse_event_timestamp(value: &Value, field: FieldName) -> Result<DateTime<Utc>, Error> {
    value
        .as_str()
        .map(str::trim)
        .and_then(parse_timestamp_text)
        .ok_or_else(|| validation_error(INVALID_DATE_TIME, field, ValidationCode::InvalidTimestamp))
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Validate a `userId` body field. Blank values yield `missing_message`.
pub(crate) fn parse_user_id(
    value: Option<&Value>,
    field: FieldName,
    missing_message: &str,
) -> Result<UserId, Error> {
    if is_blank(value) {
        return Err(validation_error(
            missing_message,
            field,
            ValidationCode::MissingField,
        ));
    }
    value
        .and_then(json_integer)
        .and_then(|raw| UserId::new(raw).ok())
        .ok_or_else(|| validation_error(INVALID_USER_ID, field, ValidationCode::InvalidIdentifier))
}

/// Validate an `{id}` path segment.
pub(crate) fn parse_event_id(raw: &str) -> Result<EventId, Error> {
    raw.parse::<EventId>().map_err(|_| {
        validation_error(
            INVALID_EVENT_ID,
            FieldName::new("id"),
            ValidationCode::InvalidIdentifier,
        )
    })
}
