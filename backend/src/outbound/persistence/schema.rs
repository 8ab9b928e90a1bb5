//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users managed outside this service.
    users (id) {
        id -> Int4,
        name -> Text,
        email -> Text,
    }
}

diesel::table! {
    /// Scheduled events. `capacity` is constrained to `1..=1000`.
    events (id) {
        id -> Int4,
        title -> Text,
        date_time -> Timestamptz,
        location -> Text,
        capacity -> Int4,
    }
}

diesel::table! {
    /// One row per user registered for an event.
    ///
    /// The composite primary key rejects duplicate registrations.
    registrations (user_id, event_id) {
        user_id -> Int4,
        event_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(registrations -> events (event_id));
diesel::joinable!(registrations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(events, registrations, users);
