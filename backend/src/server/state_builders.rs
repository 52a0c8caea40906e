//! Build the HTTP adapter state from the configured storage.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use mount_manager::domain::ports::{
    AccountSettingsRepository, CouplingRepository, MountColorRepository, MountRepository,
    ServerDirectory,
};
use mount_manager::domain::{
    AccountSettingsService, CouplingService, MountColorService, MountService,
};
use mount_manager::inbound::http::state::HttpState;
use mount_manager::outbound::memory::InMemoryStore;
use mount_manager::outbound::persistence::{
    DieselAccountSettingsRepository, DieselCouplingRepository, DieselMountColorRepository,
    DieselMountRepository, DieselServerDirectory,
};

use super::ServerConfig;

fn wire<M, C, S, D, K>(
    mounts: Arc<M>,
    couplings: Arc<C>,
    settings: Arc<S>,
    servers: Arc<D>,
    colors: Arc<K>,
) -> HttpState
where
    M: MountRepository + 'static,
    C: CouplingRepository + 'static,
    S: AccountSettingsRepository + 'static,
    D: ServerDirectory + 'static,
    K: MountColorRepository + 'static,
{
    HttpState::from_services(
        Arc::new(MountService::new(mounts.clone(), settings.clone(), colors.clone())),
        Arc::new(MountColorService::new(colors)),
        Arc::new(CouplingService::new(couplings, mounts)),
        Arc::new(AccountSettingsService::new(settings, servers)),
    )
}

/// Diesel adapters when a pool is configured, otherwise one shared
/// in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => wire(
            Arc::new(DieselMountRepository::new(pool.clone())),
            Arc::new(DieselCouplingRepository::new(pool.clone())),
            Arc::new(DieselAccountSettingsRepository::new(pool.clone())),
            Arc::new(DieselServerDirectory::new(pool.clone())),
            Arc::new(DieselMountColorRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            let store = Arc::new(InMemoryStore::with_default_catalogue());
            wire(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store,
            )
        }
    };
    web::Data::new(state)
}
