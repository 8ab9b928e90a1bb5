//! Domain primitives, rules, ports, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, the registration admission rule, and the services that
//! implement the driving ports. Nothing in this module knows about actix or
//! Diesel; adapters translate at the edges.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: closed failure taxonomy returned by services.
//! - [`Event`], [`NewEvent`], [`EventId`], [`Capacity`]: the event aggregate.
//! - [`UserId`], [`RegisteredUser`]: projection of the externally managed user.
//! - [`RegistrationAttempt`] and [`check_admission`]: the admission rule.
//! - [`EventStats`]: occupancy statistics.
//! - [`TraceId`]: request-scoped correlation identifier.

pub mod error;
pub mod event;
pub mod event_service;
pub mod event_stats;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::event::{
    Capacity, Event, EventDetail, EventDraft, EventId, EventOccupancy, EventValidationError,
    MAX_EVENT_CAPACITY, NewEvent,
};
pub use self::event_service::{EventCommandService, EventQueryService};
pub use self::event_stats::EventStats;
pub use self::registration::{RegistrationAttempt, RegistrationRejection, check_admission};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::TraceId;
pub use self::user::{InvalidUserId, RegisteredUser, UserId};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
