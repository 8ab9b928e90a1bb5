//! Registration HTTP handlers.
//!
//! ```text
//! POST   /events/{id}/register
//! DELETE /events/{id}/register
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::RegistrationRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::MessageResponseBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, USER_ID_REQUIRED_FOR_CANCELLATION, USER_ID_REQUIRED_FOR_REGISTRATION,
    parse_event_id, parse_user_id,
};

const USER_REGISTERED: &str = "User registered for the event successfully.";
const USER_ID_FIELD: FieldName = FieldName::new("userId");

/// Request payload naming the user to register or cancel.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequestBody {
    #[schema(value_type = i32, minimum = 1, example = 42)]
    pub user_id: Option<Value>,
}

/// Register a user for an event.
///
/// Registration is refused once the event has started, when it is full, or
/// when the user is already registered.
#[utoipa::path(
    post,
    path = "/events/{id}/register",
    params(("id" = i32, Path, description = "Event identifier")),
    request_body = RegistrationRequestBody,
    responses(
        (status = 201, description = "User registered", body = MessageResponseBody),
        (status = 400, description = "Invalid request, past event, or event full", body = MessageResponseBody),
        (status = 404, description = "Event or user not found", body = MessageResponseBody),
        (status = 409, description = "User already registered", body = MessageResponseBody)
    ),
    tags = ["registrations"],
    operation_id = "registerForEvent"
)]
#[post("/events/{id}/register")]
pub async fn register_for_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RegistrationRequestBody>,
) -> ApiResult<HttpResponse> {
    let event_id = parse_event_id(&path)?;
    let user_id = parse_user_id(
        payload.user_id.as_ref(),
        USER_ID_FIELD,
        USER_ID_REQUIRED_FOR_REGISTRATION,
    )?;
    state
        .registrations
        .register(RegistrationRequest { event_id, user_id })
        .await?;

    Ok(HttpResponse::Created().json(MessageResponseBody::success(USER_REGISTERED)))
}

/// Cancel a user's registration.
#[utoipa::path(
    delete,
    path = "/events/{id}/register",
    params(("id" = i32, Path, description = "Event identifier")),
    request_body = RegistrationRequestBody,
    responses(
        (status = 204, description = "Registration cancelled"),
        (status = 400, description = "Invalid request", body = MessageResponseBody),
        (status = 404, description = "Registration not found", body = MessageResponseBody)
    ),
    tags = ["registrations"],
    operation_id = "cancelRegistration"
)]
#[delete("/events/{id}/register")]
pub async fn cancel_registration(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RegistrationRequestBody>,
) -> ApiResult<HttpResponse> {
    let event_id = parse_event_id(&path)?;
    let user_id = parse_user_id(
        payload.user_id.as_ref(),
        USER_ID_FIELD,
        USER_ID_REQUIRED_FOR_CANCELLATION,
    )?;
    state
        .registrations
        .cancel(RegistrationRequest { event_id, user_id })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "registrations_tests.rs"]
mod tests;
