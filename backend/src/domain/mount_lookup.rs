//! Mount lookup shared by the mount and coupling services.

use crate::domain::ports::{MountRepository, MountRepositoryError};
use crate::domain::{EntityKind, Error, Mount, MountId, UserId, assert_owned};

pub(crate) fn map_mount_repository_error(error: MountRepositoryError) -> Error {
    match error {
        MountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("mount repository unavailable: {message}"))
        }
        MountRepositoryError::Query { message } => {
            Error::internal(format!("mount repository error: {message}"))
        }
    }
}

/// Resolve `mount_id` to a mount owned by `requester`.
///
/// # Errors
/// `NotFound` when the mount does not exist, `Forbidden` when another user
/// owns it, and the mapped repository error when the store fails.
pub async fn get_mount<R>(repo: &R, mount_id: MountId, requester: &UserId) -> Result<Mount, Error>
where
    R: MountRepository + ?Sized,
{
    let mount = repo
        .find_by_id(&mount_id)
        .await
        .map_err(map_mount_repository_error)?
        .ok_or_else(|| Error::entity_not_found(EntityKind::Mount, mount_id))?;
    assert_owned(&mount, requester)?;
    Ok(mount)
}
