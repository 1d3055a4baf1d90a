//! Service desk entry-point: loads settings, prepares the store, and serves
//! the JSON API, dashboard pages, and health probes.

mod server;

use std::time::Duration;

use actix_web::web;
use chrono::Utc;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use service_desk::demo_data::DemoData;
use service_desk::inbound::http::health::HealthState;
use service_desk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use service_desk::outbound::persistence::{DbPool, DieselDemoSeeder, PoolConfig, run_migrations};
use service_desk::settings::ServerSettings;

const POOL_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Migrate, optionally seed, and open a pool for `database_url`.
async fn prepare_database(database_url: &str, seed_demo_data: bool) -> std::io::Result<DbPool> {
    run_migrations(database_url)
        .await
        .map_err(|e| io_error("database migration failed", e))?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_connection_timeout(POOL_CHECKOUT_TIMEOUT),
    )
    .await
    .map_err(|e| io_error("database pool creation failed", e))?;

    if seed_demo_data {
        let data = DemoData::build(Utc::now()).map_err(|e| io_error("demo data is invalid", e))?;
        DieselDemoSeeder::new(pool.clone())
            .seed(&data)
            .await
            .map_err(|e| io_error("demo data seeding failed", e))?;
        info!("demo data seeded");
    }
    Ok(pool)
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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io_error("invalid settings", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io_error("invalid settings", e))?;
    let session = session_settings_from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(|e| io_error("invalid session configuration", e))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_shared_password(settings.shared_password());
    if let Some(database_url) = settings.database_url.as_deref() {
        let pool = prepare_database(database_url, settings.seed_demo_data).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting service desk");
    create_server(health_state, config)?.await
}
