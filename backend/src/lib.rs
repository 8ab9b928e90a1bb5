//! Event registration backend.
//!
//! Events carry a fixed capacity and start time; users register against
//! them through a transactional admission check. The crate is laid out
//! hexagonally: `domain` holds entities, ports and services, `inbound::http`
//! adapts them to REST, and `outbound::persistence` implements the driven
//! ports on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
