//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EventCommand, EventQuery, RegistrationCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub events: Arc<dyn EventCommand>,
    pub events_query: Arc<dyn EventQuery>,
    pub registrations: Arc<dyn RegistrationCommand>,
}

impl HttpState {
    pub fn new(
        events: Arc<dyn EventCommand>,
        events_query: Arc<dyn EventQuery>,
        registrations: Arc<dyn RegistrationCommand>,
    ) -> Self {
        Self {
            events,
            events_query,
            registrations,
        }
    }
}
