//! Ports for the reference catalogues: the read-only game server list and
//! the editable mount colour catalogue.

use async_trait::async_trait;

use crate::domain::{MountColor, MountColorId, MountType};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "catalogue query failed: {message}",
    }
}

/// Directory of known game servers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerDirectory: Send + Sync {
    /// Whether a server with exactly this name exists.
    async fn server_exists(&self, name: &str) -> Result<bool, CatalogueRepositoryError>;
}

/// Catalogue of colour variants per mount type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MountColorRepository: Send + Sync {
    /// Fetch a colour by id. `None` when absent.
    async fn find_by_id(
        &self,
        id: &MountColorId,
    ) -> Result<Option<MountColor>, CatalogueRepositoryError>;

    /// Colours available for `mount_type`, ordered by English name.
    async fn list_by_type(
        &self,
        mount_type: MountType,
    ) -> Result<Vec<MountColor>, CatalogueRepositoryError>;

    /// Add a colour under its own id.
    async fn insert(&self, color: &MountColor) -> Result<(), CatalogueRepositoryError>;

    /// Replace the type and names of a stored colour. Returns `false` when
    /// no row matched.
    async fn update(&self, color: &MountColor) -> Result<bool, CatalogueRepositoryError>;

    /// Remove a colour. Returns `false` when no row matched.
    async fn delete(&self, id: &MountColorId) -> Result<bool, CatalogueRepositoryError>;
}
