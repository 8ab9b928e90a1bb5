//! Backend entry-point: loads settings, prepares the database, and serves the
//! event API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use events_backend::inbound::http::health::HealthState;
use events_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use events_backend::settings::ServerSettings;

use server::{ServerConfig, create_server, drain_on};

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(err) => warn!(error = %err, "SIGTERM handler unavailable"),
        }
    }

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl-C handler unavailable; server must be stopped externally");
        std::future::pending::<()>().await;
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let database_url = settings.database_url().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    if settings.run_migrations {
        run_pending_migrations(&database_url)
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size)
            .with_connection_timeout(settings.pool_connection_timeout()),
    )
    .await
    .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(bind_addr, pool);
    info!(addr = %config.bind_addr(), "starting event API");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await
}
