//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every event, registration and health endpoint along
//! with the response envelopes. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::envelope::{MessageResponseBody, ResponseStatus};
use crate::inbound::http::events::{
    CreateEventRequestBody, CreateEventResponseBody, EventBody, EventDetailBody,
    EventDetailResponseBody, EventStatsBody, EventStatsResponseBody, RegisteredUserBody,
    UpcomingEventsData, UpcomingEventsResponseBody,
};
use crate::inbound::http::registrations::RegistrationRequestBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event registration API",
        description = "Create events, register users against capacity, and report occupancy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::list_upcoming_events,
        crate::inbound::http::events::get_event,
        crate::inbound::http::events::get_event_stats,
        crate::inbound::http::registrations::register_for_event,
        crate::inbound::http::registrations::cancel_registration,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ResponseStatus,
        MessageResponseBody,
        CreateEventRequestBody,
        CreateEventResponseBody,
        EventBody,
        RegisteredUserBody,
        EventDetailBody,
        EventDetailResponseBody,
        UpcomingEventsData,
        UpcomingEventsResponseBody,
        EventStatsBody,
        EventStatsResponseBody,
        RegistrationRequestBody,
    )),
    tags(
        (name = "events", description = "Event creation and queries"),
        (name = "registrations", description = "Registering and cancelling attendance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
