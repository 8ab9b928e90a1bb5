//! Test helpers for HTTP handler suites.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{MockEventCommand, MockEventQuery, MockRegistrationCommand};
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub(crate) struct MockPorts {
    pub events: MockEventCommand,
    pub events_query: MockEventQuery,
    pub registrations: MockRegistrationCommand,
}

impl MockPorts {
    fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.events),
            Arc::new(self.events_query),
            Arc::new(self.registrations),
        )
    }
}

/// Application wired exactly as in production, minus middleware.
pub(crate) fn test_app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(routes::configure)
}
