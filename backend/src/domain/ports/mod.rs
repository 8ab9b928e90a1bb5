//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`EventCommand`, `EventQuery`, `RegistrationCommand`) are
//! implemented by domain services and consumed by inbound adapters. Driven
//! ports (`EventRepository`, `RegistrationRepository`) are implemented by
//! persistence adapters and report failures through typed error enums.

mod macros;
pub(crate) use macros::define_port_error;

mod event_command;
mod event_query;
mod event_repository;
mod registration_command;
mod registration_repository;

#[cfg(test)]
pub use event_command::MockEventCommand;
pub use event_command::{CreateEventRequest, CreateEventResponse, EventCommand};
#[cfg(test)]
pub use event_query::MockEventQuery;
pub use event_query::EventQuery;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{RegistrationCommand, RegistrationRequest};
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
