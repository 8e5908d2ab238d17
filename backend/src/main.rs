//! Geonotes server entry point.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use geonotes::inbound::http::health::HealthState;
use geonotes::inbound::http::session_config::{BuildMode, session_settings_from_env};
use geonotes::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use geonotes::server::{ServerConfig, create_server};
use geonotes::settings::ServerSettings;

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

async fn connect_database(
    settings: &ServerSettings,
    database_url: &str,
) -> std::io::Result<DbPool> {
    if settings.run_migrations() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations applied");
    }
    let pool_size = settings.pool_size().map_err(std::io::Error::other)?;
    DbPool::new(PoolConfig::new(database_url).with_max_size(pool_size))
        .await
        .map_err(std::io::Error::other)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings =
        ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr).with_login_mode(settings.login_mode());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting geonotes server");
    create_server(health_state, config)?.await
}
