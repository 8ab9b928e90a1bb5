//! Route table for the event API.

use actix_web::web;

use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::{events, registrations};

/// Register event and registration endpoints plus the JSON body config.
///
/// `/events/upcoming` is registered ahead of `/events/{id}` so the literal
/// segment is not captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(events::create_event)
        .service(events::list_upcoming_events)
        .service(events::get_event)
        .service(events::get_event_stats)
        .service(registrations::register_for_event)
        .service(registrations::cancel_registration);
}
