//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; adapters convert them into
//! validated domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{events, registrations, users};

/// Row struct for reading from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: i32,
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub capacity: i32,
}

/// Insertable struct for creating event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub title: &'a str,
    pub date_time: DateTime<Utc>,
    pub location: &'a str,
    pub capacity: i32,
}

/// Public user columns exposed on event detail.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegisteredUserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Insertable struct for registrations; `created_at` uses the column default.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewRegistrationRow {
    pub user_id: i32,
    pub event_id: i32,
}
