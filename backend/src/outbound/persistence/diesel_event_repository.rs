//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.
//!
//! Rows are converted through the validated domain constructors, so a row
//! that violates an event invariant surfaces as a query error instead of an
//! invalid [`Event`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{
    Event, EventDetail, EventDraft, EventId, EventOccupancy, NewEvent, RegisteredUser, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EventRow, NewEventRow, RegisteredUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, registrations, users};

/// Diesel-backed implementation of the event repository port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventRepositoryError {
    map_basic_pool_error(error, EventRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    map_basic_diesel_error(
        error,
        EventRepositoryError::query,
        EventRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain event.
pub(crate) fn row_to_event(row: EventRow) -> Result<Event, EventRepositoryError> {
    let EventRow {
        id,
        title,
        date_time,
        location,
        capacity,
    } = row;

    let id = EventId::new(id).map_err(|err| EventRepositoryError::query(err.to_string()))?;
    let details = NewEvent::new(EventDraft {
        title,
        date_time,
        location,
        capacity: i64::from(capacity),
    })
    .map_err(|err| EventRepositoryError::query(format!("event {id}: {err}")))?;
    Ok(Event::new(id, details))
}

fn row_to_registered_user(row: RegisteredUserRow) -> Result<RegisteredUser, EventRepositoryError> {
    let RegisteredUserRow { id, name, email } = row;
    let id = UserId::new(i64::from(id)).map_err(|err| EventRepositoryError::query(err.to_string()))?;
    Ok(RegisteredUser { id, name, email })
}

fn count_to_u32(count: i64) -> Result<u32, EventRepositoryError> {
    u32::try_from(count)
        .map_err(|_| EventRepositoryError::query(format!("registration count {count} out of range")))
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn insert(&self, event: &NewEvent) -> Result<Event, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEventRow {
            title: event.title(),
            date_time: event.date_time(),
            location: event.location(),
            capacity: i32::from(event.capacity().get()),
        };

        let row = diesel::insert_into(events::table)
            .values(&new_row)
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_event(row)
    }

    async fn find_detail(
        &self,
        id: EventId,
    ) -> Result<Option<EventDetail>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Both reads share one transaction so the user list matches the event.
        let rows = conn
            .transaction(|conn| {
                async move {
                    let event = events::table
                        .find(id.get())
                        .select(EventRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(event) = event else {
                        return Ok(None);
                    };
                    let users: Vec<RegisteredUserRow> = registrations::table
                        .inner_join(users::table)
                        .filter(registrations::event_id.eq(id.get()))
                        .order((registrations::created_at.asc(), registrations::user_id.asc()))
                        .select(RegisteredUserRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(Some((event, users)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let Some((event_row, user_rows)) = rows else {
            return Ok(None);
        };
        let registered_users = user_rows
            .into_iter()
            .map(row_to_registered_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(EventDetail {
            event: row_to_event(event_row)?,
            registered_users,
        }))
    }

    async fn find_occupancy(
        &self,
        id: EventId,
    ) -> Result<Option<EventOccupancy>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    let event = events::table
                        .find(id.get())
                        .select(EventRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(event) = event else {
                        return Ok(None);
                    };
                    let count: i64 = registrations::table
                        .filter(registrations::event_id.eq(id.get()))
                        .count()
                        .get_result(conn)
                        .await?;
                    Ok(Some((event, count)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows.map(|(event_row, count)| {
            Ok(EventOccupancy {
                event: row_to_event(event_row)?,
                registrations: count_to_u32(count)?,
            })
        })
        .transpose()
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .filter(events::date_time.gt(now))
            .order((events::date_time.asc(), events::location.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_event).collect()
    }
}
