//! Mount manager entry point: loads settings, prepares storage and runs the
//! HTTP server.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mount_manager::inbound::http::health::HealthState;
use mount_manager::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use mount_manager::settings::ServerSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect(settings: &ServerSettings, database_url: &str) -> std::io::Result<DbPool> {
    run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    let config = PoolConfig::new(database_url)
        .with_max_size(settings.db_max_connections())
        .with_connection_timeout(settings.db_connection_timeout());
    DbPool::new(config).await.map_err(std::io::Error::other)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;

    let key = settings.session_key().map_err(std::io::Error::other)?;
    let same_site = settings.same_site().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(key, settings.session_cookie_secure, same_site, bind_addr);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_prometheus()?));

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting mount manager");
    create_server(health_state, config)?.await
}
