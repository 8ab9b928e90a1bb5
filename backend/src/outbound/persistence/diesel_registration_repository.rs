//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel ORM.
//!
//! `register` locks the event row with `SELECT ... FOR UPDATE`, so concurrent
//! registrations for the same event queue behind one another and each sees
//! the count left by the previous commit. The clock is read only once the
//! lock is held, so time spent waiting for it counts against the start time.
//! The composite primary key on `registrations` rejects duplicates that slip
//! past the lock.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{EventId, RegistrationAttempt, UserId, check_admission};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_event_repository::row_to_event;
use super::models::{EventRow, NewRegistrationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, registrations};

/// Field list reported when the composite key rejects an insert.
const REGISTRATION_KEY_FIELDS: &str = "userId, eventId";

/// Diesel-backed implementation of the registration repository port.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselRegistrationRepository {
    /// Create a new repository over `pool`, judging start times with `clock`.
    #[must_use]
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

/// Failure inside the registration transaction.
///
/// Domain refusals and driver errors both roll the transaction back; they are
/// told apart only once it has finished.
#[derive(Debug)]
enum TxError {
    Refused(RegistrationRepositoryError),
    Diesel(DieselError),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<RegistrationRepositoryError> for TxError {
    fn from(error: RegistrationRepositoryError) -> Self {
        Self::Refused(error)
    }
}

fn map_pool_error(error: PoolError) -> RegistrationRepositoryError {
    map_basic_pool_error(error, RegistrationRepositoryError::connection)
}

/// Map Diesel errors raised while writing registrations.
///
/// Constraint violations carry domain meaning here: the primary key signals a
/// duplicate and the foreign keys signal a missing user or event.
fn map_diesel_error(
    error: DieselError,
    event_id: EventId,
    user_id: UserId,
) -> RegistrationRepositoryError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                %event_id,
                %user_id,
                "duplicate registration rejected"
            );
            return RegistrationRepositoryError::duplicate(REGISTRATION_KEY_FIELDS);
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            let constraint = info.constraint_name().unwrap_or_default();
            if constraint.contains("user_id") {
                return RegistrationRepositoryError::user_not_found(user_id.get());
            }
            if constraint.contains("event_id") {
                return RegistrationRepositoryError::event_not_found(event_id.get());
            }
            warn!(
                constraint,
                message = info.message(),
                "unrecognised foreign key violation on registrations"
            );
        }
        _ => {}
    }
    map_basic_diesel_error(
        error,
        RegistrationRepositoryError::query,
        RegistrationRepositoryError::connection,
    )
}

fn registration_count(count: i64) -> Result<u32, RegistrationRepositoryError> {
    u32::try_from(count).map_err(|_| {
        RegistrationRepositoryError::query(format!("registration count {count} out of range"))
    })
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn register(
        &self,
        attempt: &RegistrationAttempt,
    ) -> Result<(), RegistrationRepositoryError> {
        let RegistrationAttempt { event_id, user_id } = *attempt;
        let clock = self.clock.as_ref();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let event_row = events::table
                    .find(event_id.get())
                    .select(EventRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| RegistrationRepositoryError::event_not_found(event_id.get()))?;
                let now = clock.utc();
                let event = row_to_event(event_row)
                    .map_err(|err| RegistrationRepositoryError::query(err.to_string()))?;

                let existing: i64 = registrations::table
                    .filter(registrations::event_id.eq(event_id.get()))
                    .count()
                    .get_result(conn)
                    .await?;
                check_admission(&event, registration_count(existing)?, now)
                    .map_err(RegistrationRepositoryError::from)?;

                diesel::insert_into(registrations::table)
                    .values(NewRegistrationRow {
                        user_id: user_id.get(),
                        event_id: event_id.get(),
                    })
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| match error {
            TxError::Refused(refusal) => refusal,
            TxError::Diesel(error) => map_diesel_error(error, event_id, user_id),
        })
    }

    async fn cancel(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<(), RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(registrations::table.find((user_id.get(), event_id.get())))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, event_id, user_id))?;

        if deleted == 0 {
            return Err(RegistrationRepositoryError::not_registered(
                event_id.get(),
                user_id.get(),
            ));
        }
        Ok(())
    }
}
