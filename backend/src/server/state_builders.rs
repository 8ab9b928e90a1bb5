//! Wire Diesel repositories into domain services behind the HTTP ports.

use std::sync::Arc;

use mockable::Clock;

use events_backend::domain::{EventCommandService, EventQueryService, RegistrationService};
use events_backend::inbound::http::state::HttpState;
use events_backend::outbound::persistence::{
    DbPool, DieselEventRepository, DieselRegistrationRepository,
};

/// Build handler state over one shared pool and clock.
pub(crate) fn build_http_state(pool: &DbPool, clock: &Arc<dyn Clock>) -> HttpState {
    let event_repo = Arc::new(DieselEventRepository::new(pool.clone()));
    let registration_repo = Arc::new(DieselRegistrationRepository::new(
        pool.clone(),
        Arc::clone(clock),
    ));

    HttpState::new(
        Arc::new(EventCommandService::new(Arc::clone(&event_repo))),
        Arc::new(EventQueryService::new(event_repo, Arc::clone(clock))),
        Arc::new(RegistrationService::new(registration_repo)),
    )
}
