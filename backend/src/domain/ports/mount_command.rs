//! Driving port for mount mutations.

use async_trait::async_trait;

use crate::domain::{Error, Mount, MountId, MountPatch, NewMount, UserId};

/// Use-case port for creating, editing and removing mounts.
///
/// Every operation runs the ownership guard on the stored record before it
/// mutates anything.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MountCommand: Send + Sync {
    /// Create a mount for the requester.
    ///
    /// # Errors
    /// - `NotFound` when the requester has no account settings or the colour
    ///   does not exist.
    /// - `InvalidRequest` when the type is not enabled for the account, the
    ///   colour belongs to another type, or the mount fails validation.
    async fn create_mount(&self, requester: &UserId, mount: NewMount) -> Result<Mount, Error>;

    /// Apply a partial update to one of the requester's mounts.
    async fn update_mount(
        &self,
        mount_id: MountId,
        requester: &UserId,
        patch: MountPatch,
    ) -> Result<Mount, Error>;

    /// Delete one of the requester's mounts. Existing couplings keep their
    /// snapshots.
    async fn delete_mount(&self, mount_id: MountId, requester: &UserId) -> Result<(), Error>;
}
