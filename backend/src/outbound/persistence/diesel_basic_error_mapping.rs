//! Shared Diesel error mapping for repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Map a pool error through a repository's connection constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    warn!(%error, "database pool checkout failed");
    connection(error.into_message())
}

/// Map Diesel failures that carry no domain meaning onto query or connection
/// constructors.
///
/// Driver detail is logged here and replaced with a fixed message, so nothing
/// from the database reaches callers.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}
