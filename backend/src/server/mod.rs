//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

use events_backend::Trace;
#[cfg(debug_assertions)]
use events_backend::doc::ApiDoc;
use events_backend::inbound::http::health::{HealthState, live, ready};
use events_backend::inbound::http::routes;
use events_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the configured pool.
///
/// Readiness flips to healthy once the listener is bound. Signal handling is
/// left to [`drain_on`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails or, with the
/// `metrics` feature, when the Prometheus registry cannot be built.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let http_state = web::Data::new(build_http_state(&config.db_pool, &clock));
    let ServerConfig {
        bind_addr,
        db_pool: _,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = metrics::build_metrics()?;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Once `signal` resolves, fail liveness probes and stop the server
/// gracefully, letting in-flight requests finish.
pub async fn drain_on<F>(signal: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested, draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use events_backend::domain::TRACE_ID_HEADER;
    use events_backend::outbound::persistence::{DbPool, PoolConfig};
    use serde_json::Value;

    async fn deps() -> AppDependencies {
        // The pool connects lazily; these tests never reach the database.
        let pool = DbPool::new(PoolConfig::new("postgres://localhost:1/unused"))
            .await
            .expect("lazy pool");
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(build_http_state(&pool, &clock)),
        }
    }

    #[actix_web::test]
    async fn readiness_follows_health_state() {
        let deps = deps().await;
        let health = deps.health_state.clone();
        let app = actix_test::init_service(build_app(deps)).await;

        let before = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn draining_fails_liveness_and_stops_the_server() {
        let health = web::Data::new(HealthState::new());
        let server = HttpServer::new(App::new)
            .disable_signals()
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        assert!(health.is_alive());

        drain_on(async {}, health.clone(), handle).await;

        assert!(!health.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }

    #[actix_web::test]
    async fn validation_failures_are_traced_without_touching_the_store() {
        let app = actix_test::init_service(build_app(deps().await)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/events/not-a-number")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "fail");
    }
}
