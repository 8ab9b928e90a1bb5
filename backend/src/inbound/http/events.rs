//! Event HTTP handlers.
//!
//! ```text
//! POST /events
//! GET  /events/upcoming
//! GET  /events/{id}
//! GET  /events/{id}/stats
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::CreateEventRequest;
use crate::domain::{Error, Event, EventDetail, EventDraft, EventStats, NewEvent, RegisteredUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{MessageResponseBody, ResponseStatus};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, REQUIRED_EVENT_FIELDS, ValidationCode, non_blank_text, parse_capacity, parse_event_id,
    parse_event_timestamp, provided, validation_error,
};

const EVENT_CREATED: &str = "Event created successfully.";

/// Request payload for creating an event.
///
/// Fields are loosely typed so that missing and mistyped values share the
/// same validation messages.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequestBody {
    #[schema(value_type = String, example = "RustConf")]
    pub title: Option<Value>,
    #[schema(value_type = String, format = "date-time", example = "2030-09-01T10:00:00Z")]
    pub date_time: Option<Value>,
    #[schema(value_type = String, example = "Montreal")]
    pub location: Option<Value>,
    #[schema(value_type = i32, minimum = 1, maximum = 1000, example = 250)]
    pub capacity: Option<Value>,
}

/// Response payload for event creation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponseBody {
    pub status: ResponseStatus,
    #[schema(example = "Event created successfully.")]
    pub message: String,
    pub event_id: i32,
}

/// Event as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub id: i32,
    pub title: String,
    #[schema(format = "date-time", example = "2030-09-01T10:00:00.000Z")]
    pub date_time: String,
    pub location: String,
    pub capacity: u16,
}

/// Public fields of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegisteredUserBody {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Event detail including registered users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailBody {
    #[serde(flatten)]
    pub event: EventBody,
    pub registered_users: Vec<RegisteredUserBody>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDetailResponseBody {
    pub status: ResponseStatus,
    pub data: EventDetailBody,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpcomingEventsData {
    pub events: Vec<EventBody>,
}

/// Upcoming events listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpcomingEventsResponseBody {
    pub status: ResponseStatus,
    /// Number of events in `data.events`.
    pub results: usize,
    pub data: UpcomingEventsData,
}

/// Occupancy statistics for one event.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventStatsBody {
    pub total_registrations: u32,
    /// Negative when an event holds more registrations than its capacity.
    pub remaining_capacity: i64,
    #[schema(example = 30.0)]
    pub percentage_capacity_used: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventStatsResponseBody {
    pub status: ResponseStatus,
    pub data: EventStatsBody,
}

pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Event> for EventBody {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id().get(),
            title: event.title().to_owned(),
            date_time: format_timestamp(event.date_time()),
            location: event.location().to_owned(),
            capacity: event.capacity().get(),
        }
    }
}

impl From<RegisteredUser> for RegisteredUserBody {
    fn from(user: RegisteredUser) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            email: user.email,
        }
    }
}

impl From<EventDetail> for EventDetailBody {
    fn from(detail: EventDetail) -> Self {
        Self {
            event: EventBody::from(&detail.event),
            registered_users: detail
                .registered_users
                .into_iter()
                .map(RegisteredUserBody::from)
                .collect(),
        }
    }
}

impl From<EventStats> for EventStatsBody {
    fn from(stats: EventStats) -> Self {
        Self {
            total_registrations: stats.total_registrations,
            remaining_capacity: stats.remaining_capacity,
            percentage_capacity_used: stats.percentage_capacity_used,
        }
    }
}

/// Validate the creation payload in the order clients expect: presence of
/// every field, then capacity, then the timestamp.
fn parse_create_event_payload(payload: CreateEventRequestBody) -> Result<NewEvent, Error> {
    let CreateEventRequestBody {
        title,
        date_time,
        location,
        capacity,
    } = payload;
    let (Some(title), Some(date_time), Some(location), Some(capacity)) = (
        non_blank_text(title),
        provided(date_time),
        non_blank_text(location),
        provided(capacity),
    ) else {
        return Err(validation_error(
            REQUIRED_EVENT_FIELDS,
            FieldName::new("title, dateTime, location, capacity"),
            ValidationCode::MissingField,
        ));
    };

    let capacity = parse_capacity(&capacity, FieldName::new("capacity"))?;
    let date_time = parse_event_timestamp(&date_time, FieldName::new("dateTime"))?;

    NewEvent::new(EventDraft {
        title,
        date_time,
        location,
        capacity,
    })
    .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Create an event.
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequestBody,
    responses(
        (status = 201, description = "Event created", body = CreateEventResponseBody),
        (status = 400, description = "Invalid request", body = MessageResponseBody),
        (status = 500, description = "Internal server error", body = MessageResponseBody)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEventRequestBody>,
) -> ApiResult<HttpResponse> {
    let event = parse_create_event_payload(payload.into_inner())?;
    let response = state
        .events
        .create_event(CreateEventRequest { event })
        .await?;

    Ok(HttpResponse::Created().json(CreateEventResponseBody {
        status: ResponseStatus::Success,
        message: EVENT_CREATED.to_owned(),
        event_id: response.event.id().get(),
    }))
}

/// List events that have not started yet, ordered by start time then location.
#[utoipa::path(
    get,
    path = "/events/upcoming",
    responses(
        (status = 200, description = "Upcoming events", body = UpcomingEventsResponseBody),
        (status = 500, description = "Internal server error", body = MessageResponseBody)
    ),
    tags = ["events"],
    operation_id = "listUpcomingEvents"
)]
#[get("/events/upcoming")]
pub async fn list_upcoming_events(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UpcomingEventsResponseBody>> {
    let events: Vec<EventBody> = state
        .events_query
        .list_upcoming()
        .await?
        .iter()
        .map(EventBody::from)
        .collect();

    Ok(web::Json(UpcomingEventsResponseBody {
        status: ResponseStatus::Success,
        results: events.len(),
        data: UpcomingEventsData { events },
    }))
}

/// Fetch one event with its registered users.
#[utoipa::path(
    get,
    path = "/events/{id}",
    params(("id" = i32, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event detail", body = EventDetailResponseBody),
        (status = 400, description = "Invalid event id", body = MessageResponseBody),
        (status = 404, description = "Event not found", body = MessageResponseBody)
    ),
    tags = ["events"],
    operation_id = "getEvent"
)]
#[get("/events/{id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventDetailResponseBody>> {
    let event_id = parse_event_id(&path)?;
    let detail = state.events_query.get_event(event_id).await?;

    Ok(web::Json(EventDetailResponseBody {
        status: ResponseStatus::Success,
        data: detail.into(),
    }))
}

/// Report registration totals against capacity.
#[utoipa::path(
    get,
    path = "/events/{id}/stats",
    params(("id" = i32, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Occupancy statistics", body = EventStatsResponseBody),
        (status = 400, description = "Invalid event id", body = MessageResponseBody),
        (status = 404, description = "Event not found", body = MessageResponseBody)
    ),
    tags = ["events"],
    operation_id = "getEventStats"
)]
#[get("/events/{id}/stats")]
pub async fn get_event_stats(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventStatsResponseBody>> {
    let event_id = parse_event_id(&path)?;
    let stats = state.events_query.get_stats(event_id).await?;

    Ok(web::Json(EventStatsResponseBody {
        status: ResponseStatus::Success,
        data: stats.into(),
    }))
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
