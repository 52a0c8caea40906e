//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountSettingsCommand, AccountSettingsQuery, CouplingCommand, CouplingQuery,
    MountColorCommand, MountColorQuery, MountCommand, MountQuery,
};

/// Driving ports available to HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mount reads.
    pub mounts: Arc<dyn MountQuery>,
    /// Mount writes.
    pub mount_commands: Arc<dyn MountCommand>,
    /// Colour catalogue reads.
    pub mount_colors: Arc<dyn MountColorQuery>,
    /// Colour catalogue writes.
    pub mount_color_commands: Arc<dyn MountColorCommand>,
    /// Coupling reads and search.
    pub couplings: Arc<dyn CouplingQuery>,
    /// Coupling writes.
    pub coupling_commands: Arc<dyn CouplingCommand>,
    /// Account settings reads.
    pub account_settings: Arc<dyn AccountSettingsQuery>,
    /// Account settings writes.
    pub account_settings_commands: Arc<dyn AccountSettingsCommand>,
}

impl HttpState {
    /// Build state from the four services, each serving its query and
    /// command ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mount_manager::domain::{
    ///     AccountSettingsService, CouplingService, MountColorService, MountService,
    /// };
    /// use mount_manager::inbound::http::state::HttpState;
    /// use mount_manager::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::with_default_catalogue());
    /// let state = HttpState::from_services(
    ///     Arc::new(MountService::new(store.clone(), store.clone(), store.clone())),
    ///     Arc::new(MountColorService::new(store.clone())),
    ///     Arc::new(CouplingService::new(store.clone(), store.clone())),
    ///     Arc::new(AccountSettingsService::new(store.clone(), store)),
    /// );
    /// let _mounts = state.mounts.clone();
    /// ```
    #[must_use]
    pub fn from_services<M, K, C, A>(
        mounts: Arc<M>,
        colors: Arc<K>,
        couplings: Arc<C>,
        settings: Arc<A>,
    ) -> Self
    where
        M: MountQuery + MountCommand + 'static,
        K: MountColorQuery + MountColorCommand + 'static,
        C: CouplingQuery + CouplingCommand + 'static,
        A: AccountSettingsQuery + AccountSettingsCommand + 'static,
    {
        Self {
            mounts: mounts.clone(),
            mount_commands: mounts,
            mount_colors: colors.clone(),
            mount_color_commands: colors,
            couplings: couplings.clone(),
            coupling_commands: couplings,
            account_settings: settings.clone(),
            account_settings_commands: settings,
        }
    }
}
