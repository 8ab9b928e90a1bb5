//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and hold no business rules beyond running them inside the right
//! transaction. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use events_backend::outbound::persistence::{DbPool, DieselEventRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/events")).await?;
//! let events = DieselEventRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_event_repository;
mod diesel_registration_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
