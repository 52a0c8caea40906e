//! Port for mount persistence.

use async_trait::async_trait;

use crate::domain::{Mount, MountId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mount repository adapters.
    pub enum MountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "mount repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "mount repository query failed: {message}",
    }
}

/// Id-keyed mount storage.
///
/// Adapters do not enforce ownership; the domain guard does that after
/// every singular fetch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MountRepository: Send + Sync {
    /// Fetch a mount by id. `None` when absent.
    async fn find_by_id(&self, id: &MountId) -> Result<Option<Mount>, MountRepositoryError>;

    /// All mounts owned by `owner`, ordered by name.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Mount>, MountRepositoryError>;

    /// Insert a new mount.
    async fn insert(&self, mount: &Mount) -> Result<(), MountRepositoryError>;

    /// Replace a stored mount. Returns `false` when no row matched.
    async fn update(&self, mount: &Mount) -> Result<bool, MountRepositoryError>;

    /// Remove a mount. Returns `false` when no row matched.
    async fn delete(&self, id: &MountId) -> Result<bool, MountRepositoryError>;
}
