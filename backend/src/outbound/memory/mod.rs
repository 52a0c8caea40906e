//! Process-local store implementing every driven port.
//!
//! State lives in `Mutex`-guarded maps and is lost on restart. The server
//! falls back to this adapter when no database URL is configured, and the
//! integration tests drive the HTTP layer against it.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AccountSettingsRepository, AccountSettingsRepositoryError, CatalogueRepositoryError,
    CouplingRepository, CouplingRepositoryError, MountColorRepository, MountRepository,
    MountRepositoryError, ServerDirectory,
};
use crate::domain::{
    AccountSettings, AccountSettingsId, Coupling, CouplingFilter, CouplingId, LocalizedNames,
    Mount, MountColor, MountColorId, MountId, MountType, UserId,
};

const DEFAULT_SERVERS: [&str; 6] = [
    "Draconiros",
    "Hell Mina",
    "Imagiro",
    "Orukam",
    "Tal Kasha",
    "Tylezia",
];

/// Same ids and names as the catalogue seeded by the database migration.
const DEFAULT_COLORS: [(u128, MountType, &str, &str); 6] = [
    (0x8f6c2d0e_4b1a_4e52_9a51_0d1f6f3c9a01, MountType::Dragon, "Golden", "Dorée"),
    (0x8f6c2d0e_4b1a_4e52_9a51_0d1f6f3c9a02, MountType::Dragon, "Ebony", "Ébène"),
    (0x8f6c2d0e_4b1a_4e52_9a51_0d1f6f3c9a03, MountType::Dragon, "Indigo", "Indigo"),
    (0x8f6c2d0e_4b1a_4e52_9a51_0d1f6f3c9b01, MountType::Wolf, "Grey", "Gris"),
    (0x8f6c2d0e_4b1a_4e52_9a51_0d1f6f3c9b02, MountType::Wolf, "Snow", "Neige"),
    (0x8f6c2d0e_4b1a_4e52_9a51_0d1f6f3c9b03, MountType::Wolf, "Russet", "Roux"),
];

#[derive(Default)]
struct State {
    mounts: HashMap<MountId, Mount>,
    couplings: HashMap<CouplingId, Coupling>,
    settings: HashMap<AccountSettingsId, AccountSettings>,
    servers: BTreeSet<String>,
    colors: HashMap<MountColorId, MountColor>,
}

/// In-memory implementation of the mount manager's driven ports.
///
/// # Examples
/// ```
/// use mount_manager::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new().with_server("Draconiros");
/// # let _ = store;
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Empty store with no servers or colours.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a small server list and colour catalogue.
    pub fn with_default_catalogue() -> Self {
        let store = DEFAULT_SERVERS
            .into_iter()
            .fold(Self::new(), |store, name| store.with_server(name));
        DEFAULT_COLORS
            .into_iter()
            .fold(store, |store, (id, mount_type, en, fr)| {
                store.with_color(MountColor {
                    id: MountColorId::from_uuid(Uuid::from_u128(id)),
                    mount_type,
                    names: LocalizedNames {
                        en: en.to_owned(),
                        fr: fr.to_owned(),
                    },
                })
            })
    }

    /// Register a game server name.
    pub fn with_server(self, name: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.servers.insert(name.into());
        }
        self
    }

    /// Register a catalogue colour.
    pub fn with_color(self, color: MountColor) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.colors.insert(color.id, color);
        }
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl MountRepository for InMemoryStore {
    async fn find_by_id(&self, id: &MountId) -> Result<Option<Mount>, MountRepositoryError> {
        let state = self.lock().map_err(MountRepositoryError::query)?;
        Ok(state.mounts.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Mount>, MountRepositoryError> {
        let state = self.lock().map_err(MountRepositoryError::query)?;
        let mut mounts: Vec<Mount> = state
            .mounts
            .values()
            .filter(|mount| mount.user_id() == owner)
            .cloned()
            .collect();
        mounts.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        Ok(mounts)
    }

    async fn insert(&self, mount: &Mount) -> Result<(), MountRepositoryError> {
        let mut state = self.lock().map_err(MountRepositoryError::query)?;
        state.mounts.insert(mount.id(), mount.clone());
        Ok(())
    }

    async fn update(&self, mount: &Mount) -> Result<bool, MountRepositoryError> {
        let mut state = self.lock().map_err(MountRepositoryError::query)?;
        Ok(match state.mounts.get_mut(&mount.id()) {
            Some(slot) => {
                *slot = mount.clone();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &MountId) -> Result<bool, MountRepositoryError> {
        let mut state = self.lock().map_err(MountRepositoryError::query)?;
        Ok(state.mounts.remove(id).is_some())
    }
}

#[async_trait]
impl CouplingRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: &CouplingId,
    ) -> Result<Option<Coupling>, CouplingRepositoryError> {
        let state = self.lock().map_err(CouplingRepositoryError::query)?;
        Ok(state.couplings.get(id).cloned())
    }

    async fn insert(&self, coupling: &Coupling) -> Result<(), CouplingRepositoryError> {
        let mut state = self.lock().map_err(CouplingRepositoryError::query)?;
        state.couplings.insert(coupling.id(), coupling.clone());
        Ok(())
    }

    async fn delete(&self, id: &CouplingId) -> Result<bool, CouplingRepositoryError> {
        let mut state = self.lock().map_err(CouplingRepositoryError::query)?;
        Ok(state.couplings.remove(id).is_some())
    }

    async fn search(
        &self,
        filter: &CouplingFilter,
    ) -> Result<Vec<Coupling>, CouplingRepositoryError> {
        let state = self.lock().map_err(CouplingRepositoryError::query)?;
        let mut found: Vec<Coupling> = state
            .couplings
            .values()
            .filter(|coupling| filter.matches(coupling))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(found)
    }
}

#[async_trait]
impl AccountSettingsRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: &AccountSettingsId,
    ) -> Result<Option<AccountSettings>, AccountSettingsRepositoryError> {
        let state = self.lock().map_err(AccountSettingsRepositoryError::query)?;
        Ok(state.settings.get(id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountSettings>, AccountSettingsRepositoryError> {
        let state = self.lock().map_err(AccountSettingsRepositoryError::query)?;
        Ok(state
            .settings
            .values()
            .find(|settings| &settings.user_id == user_id)
            .cloned())
    }

    async fn insert(
        &self,
        settings: &AccountSettings,
    ) -> Result<(), AccountSettingsRepositoryError> {
        let mut state = self.lock().map_err(AccountSettingsRepositoryError::query)?;
        if state
            .settings
            .values()
            .any(|existing| existing.user_id == settings.user_id)
        {
            return Err(AccountSettingsRepositoryError::duplicate_user(
                settings.user_id.to_string(),
            ));
        }
        state.settings.insert(settings.id, settings.clone());
        Ok(())
    }

    async fn update(
        &self,
        settings: &AccountSettings,
    ) -> Result<bool, AccountSettingsRepositoryError> {
        let mut state = self.lock().map_err(AccountSettingsRepositoryError::query)?;
        Ok(match state.settings.get_mut(&settings.id) {
            Some(slot) => {
                *slot = settings.clone();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl ServerDirectory for InMemoryStore {
    async fn server_exists(&self, name: &str) -> Result<bool, CatalogueRepositoryError> {
        let state = self.lock().map_err(CatalogueRepositoryError::query)?;
        Ok(state.servers.contains(name))
    }
}

#[async_trait]
impl MountColorRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: &MountColorId,
    ) -> Result<Option<MountColor>, CatalogueRepositoryError> {
        let state = self.lock().map_err(CatalogueRepositoryError::query)?;
        Ok(state.colors.get(id).cloned())
    }

    async fn list_by_type(
        &self,
        mount_type: MountType,
    ) -> Result<Vec<MountColor>, CatalogueRepositoryError> {
        let state = self.lock().map_err(CatalogueRepositoryError::query)?;
        let mut colors: Vec<MountColor> = state
            .colors
            .values()
            .filter(|color| color.mount_type == mount_type)
            .cloned()
            .collect();
        colors.sort_by(|a, b| a.names.en.cmp(&b.names.en).then_with(|| a.id.cmp(&b.id)));
        Ok(colors)
    }

    async fn insert(&self, color: &MountColor) -> Result<(), CatalogueRepositoryError> {
        let mut state = self.lock().map_err(CatalogueRepositoryError::query)?;
        state.colors.insert(color.id, color.clone());
        Ok(())
    }

    async fn update(&self, color: &MountColor) -> Result<bool, CatalogueRepositoryError> {
        let mut state = self.lock().map_err(CatalogueRepositoryError::query)?;
        Ok(match state.colors.get_mut(&color.id) {
            Some(slot) => {
                *slot = color.clone();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &MountColorId) -> Result<bool, CatalogueRepositoryError> {
        let mut state = self.lock().map_err(CatalogueRepositoryError::query)?;
        Ok(state.colors.remove(id).is_some())
    }
}
