//! Integration tests for `DieselRegistrationRepository` against PostgreSQL.
//!
//! These cover the admission transaction: capacity and start-time checks,
//! uniqueness, foreign keys, and behaviour under concurrent attempts.

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use events_backend::domain::ports::{
    EventRepository, RegistrationRepository, RegistrationRepositoryError,
};
use events_backend::domain::{EventId, RegistrationAttempt, RegistrationRejection, UserId};
use futures::future::join_all;
use rstest::{fixture, rstest};

mod support;

use support::TestContext;

#[fixture]
fn context() -> Option<TestContext> {
    TestContext::from_env()
}

macro_rules! require_database {
    ($context:expr, $name:literal) => {
        match $context {
            Some(ctx) => ctx,
            None => {
                println!(concat!("SKIP: ", $name, " needs EVENTS_TEST_DATABASE_URL"));
                return;
            }
        }
    };
}

#[rstest]
fn registered_users_appear_in_registration_order(context: Option<TestContext>) {
    let ctx = require_database!(context, "registered_users_appear_in_registration_order");
    let event = ctx.seed_event("Talk", "Hall", Utc::now() + Duration::days(1), 10);
    let second_seeded = ctx.seed_user("Zed");
    let first_seeded = ctx.seed_user("Amy");

    ctx.register(event.id(), second_seeded).expect("first registration");
    ctx.register(event.id(), first_seeded).expect("second registration");

    let detail = ctx
        .runtime
        .block_on(ctx.events.find_detail(event.id()))
        .expect("query succeeds")
        .expect("event exists");
    let names: Vec<&str> = detail
        .registered_users
        .iter()
        .map(|user| user.name.as_str())
        .collect();
    assert_eq!(names, ["Zed", "Amy"]);
    assert_eq!(
        detail.registered_users.first().map(|user| user.email.as_str()),
        Some("zed@example.com")
    );
}

#[rstest]
fn duplicate_registration_is_rejected(context: Option<TestContext>) {
    let ctx = require_database!(context, "duplicate_registration_is_rejected");
    let event = ctx.seed_event("Talk", "Hall", Utc::now() + Duration::days(1), 10);
    let user = ctx.seed_user("Ada");

    ctx.register(event.id(), user).expect("first registration");
    let second = ctx.register(event.id(), user);

    assert_eq!(
        second,
        Err(RegistrationRepositoryError::duplicate("userId, eventId"))
    );
}

#[rstest]
fn full_events_refuse_further_registrations(context: Option<TestContext>) {
    let ctx = require_database!(context, "full_events_refuse_further_registrations");
    let event = ctx.seed_event("Dinner", "Loft", Utc::now() + Duration::days(1), 1);

    ctx.register(event.id(), ctx.seed_user("Ada"))
        .expect("seat available");
    let refused = ctx.register(event.id(), ctx.seed_user("Grace"));

    assert_eq!(
        refused,
        Err(RegistrationRepositoryError::rejected(
            RegistrationRejection::AtCapacity
        ))
    );
}

#[rstest]
fn started_events_refuse_registrations(context: Option<TestContext>) {
    let ctx = require_database!(context, "started_events_refuse_registrations");
    let event = ctx.seed_event("Yesterday", "Hall", Utc::now() - Duration::days(1), 10);

    let refused = ctx.register(event.id(), ctx.seed_user("Ada"));

    assert_eq!(
        refused,
        Err(RegistrationRepositoryError::rejected(
            RegistrationRejection::EventStarted
        ))
    );
}

#[rstest]
fn start_time_is_judged_after_waiting_for_the_event_lock(context: Option<TestContext>) {
    let ctx = require_database!(
        context,
        "start_time_is_judged_after_waiting_for_the_event_lock"
    );
    let event = ctx.seed_event("Launch", "Pad", Utc::now() + Duration::milliseconds(1500), 10);
    let user = ctx.seed_user("Ada");

    let lock = ctx.hold_event_lock(event.id(), StdDuration::from_secs(3));
    let outcome = ctx.register(event.id(), user);
    lock.join().expect("lock holder finished");

    assert_eq!(
        outcome,
        Err(RegistrationRepositoryError::rejected(
            RegistrationRejection::EventStarted
        ))
    );
    let occupancy = ctx
        .runtime
        .block_on(ctx.events.find_occupancy(event.id()))
        .expect("query succeeds")
        .expect("event exists");
    assert_eq!(occupancy.registrations, 0);
}

#[rstest]
fn unknown_references_are_reported(context: Option<TestContext>) {
    let ctx = require_database!(context, "unknown_references_are_reported");
    let event = ctx.seed_event("Talk", "Hall", Utc::now() + Duration::days(1), 10);
    let known_user = ctx.seed_user("Ada");
    let missing_event = EventId::new(999_999).expect("positive id");
    let missing_user = UserId::new(999_999).expect("positive id");

    assert_eq!(
        ctx.register(missing_event, known_user),
        Err(RegistrationRepositoryError::event_not_found(999_999))
    );
    assert_eq!(
        ctx.register(event.id(), missing_user),
        Err(RegistrationRepositoryError::user_not_found(999_999))
    );
}

#[rstest]
fn cancel_removes_the_registration_once(context: Option<TestContext>) {
    let ctx = require_database!(context, "cancel_removes_the_registration_once");
    let event = ctx.seed_event("Talk", "Hall", Utc::now() + Duration::days(1), 1);
    let user = ctx.seed_user("Ada");
    ctx.register(event.id(), user).expect("registration admitted");

    let first = ctx
        .runtime
        .block_on(ctx.registrations.cancel(event.id(), user));
    let second = ctx
        .runtime
        .block_on(ctx.registrations.cancel(event.id(), user));

    assert_eq!(first, Ok(()));
    assert_eq!(
        second,
        Err(RegistrationRepositoryError::not_registered(
            event.id().get(),
            user.get()
        ))
    );
    // The freed seat can be taken again.
    ctx.register(event.id(), ctx.seed_user("Grace"))
        .expect("seat released");
}

#[rstest]
fn concurrent_registrations_never_exceed_capacity(context: Option<TestContext>) {
    let ctx = require_database!(context, "concurrent_registrations_never_exceed_capacity");
    let event = ctx.seed_event("Launch", "Dock", Utc::now() + Duration::days(1), 3);
    let users: Vec<UserId> = (0..10)
        .map(|n| ctx.seed_user(&format!("Guest {n}")))
        .collect();
    let attempts: Vec<RegistrationAttempt> = users
        .iter()
        .map(|user_id| RegistrationAttempt {
            event_id: event.id(),
            user_id: *user_id,
        })
        .collect();

    let outcomes = ctx.runtime.block_on(join_all(
        attempts
            .iter()
            .map(|attempt| ctx.registrations.register(attempt)),
    ));

    let admitted = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(admitted, 3);
    assert!(
        outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().err())
            .all(|err| *err == RegistrationRepositoryError::rejected(RegistrationRejection::AtCapacity))
    );
    let occupancy = ctx
        .runtime
        .block_on(ctx.events.find_occupancy(event.id()))
        .expect("query succeeds")
        .expect("event exists");
    assert_eq!(occupancy.registrations, 3);
}

#[rstest]
fn concurrent_duplicates_admit_exactly_one(context: Option<TestContext>) {
    let ctx = require_database!(context, "concurrent_duplicates_admit_exactly_one");
    let event = ctx.seed_event("Launch", "Dock", Utc::now() + Duration::days(1), 50);
    let attempt = RegistrationAttempt {
        event_id: event.id(),
        user_id: ctx.seed_user("Ada"),
    };

    let outcomes = ctx.runtime.block_on(join_all(
        (0..5).map(|_| ctx.registrations.register(&attempt)),
    ));

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert!(outcomes.iter().filter_map(|outcome| outcome.as_ref().err()).all(
        |err| *err == RegistrationRepositoryError::duplicate("userId, eventId")
    ));
}
