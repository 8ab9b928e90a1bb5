//! HTTP inbound adapter exposing REST endpoints.

pub mod envelope;
pub mod error;
pub mod events;
pub mod health;
pub mod registrations;
pub mod routes;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

pub use error::ApiResult;
