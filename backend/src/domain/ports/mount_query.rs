//! Driving ports for reading mounts and the colour catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Mount, MountColor, MountColorId, MountId, MountType, UserId};

/// Use-case port for reading the requester's mounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MountQuery: Send + Sync {
    /// Resolve a mount id for its owner.
    ///
    /// # Errors
    /// `NotFound` when no mount has this id, `Forbidden` when it belongs to
    /// another user.
    async fn get_mount(&self, mount_id: MountId, requester: &UserId) -> Result<Mount, Error>;

    /// Every mount owned by the requester, ordered by name.
    async fn list_mounts(&self, requester: &UserId) -> Result<Vec<Mount>, Error>;
}

/// Use-case port for browsing the colour catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MountColorQuery: Send + Sync {
    /// Colours available for `mount_type`, ordered by English name.
    async fn list_mount_colors(&self, mount_type: MountType) -> Result<Vec<MountColor>, Error>;

    /// Resolve one catalogue colour.
    ///
    /// # Errors
    /// `NotFound` when no colour has this id.
    async fn get_mount_color(&self, color_id: MountColorId) -> Result<MountColor, Error>;
}
