//! Mount management use cases.
//!
//! Creation and retyping are gated on the owner's account settings, and the
//! colour is always resolved against the catalogue for the mount's type.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::account_settings_service::map_account_settings_error;
use crate::domain::mount_color_service::map_catalogue_error;
use crate::domain::mount_lookup::{get_mount, map_mount_repository_error};
use crate::domain::ports::{
    AccountSettingsRepository, MountColorRepository, MountCommand, MountQuery, MountRepository,
};
use crate::domain::{
    AccountSettings, EntityKind, Error, Mount, MountColor, MountColorId, MountDraft, MountId,
    MountPatch, MountType, NewMount, UserId, verify_mount_type_allowed,
};

fn color_mismatch(color: &MountColor, mount_type: MountType) -> Error {
    Error::invalid_request(format!(
        "colour {} does not belong to mount type {mount_type}",
        color.id
    ))
    .with_details(json!({
        "field": "colorId",
        "reason": "color_mismatch",
        "colorType": color.mount_type.as_str(),
        "mountType": mount_type.as_str(),
    }))
}

/// Mount service implementing [`MountQuery`] and [`MountCommand`].
///
/// The colour repository is only read, to resolve a mount's colour.
#[derive(Clone)]
pub struct MountService<M, S, C> {
    mounts: Arc<M>,
    settings: Arc<S>,
    colors: Arc<C>,
}

impl<M, S, C> MountService<M, S, C> {
    /// Wire the service to its mount, settings and colour stores.
    #[must_use]
    pub const fn new(mounts: Arc<M>, settings: Arc<S>, colors: Arc<C>) -> Self {
        Self {
            mounts,
            settings,
            colors,
        }
    }
}

impl<M, S, C> MountService<M, S, C>
where
    M: MountRepository,
    S: AccountSettingsRepository,
    C: MountColorRepository,
{
    async fn settings_for(&self, requester: &UserId) -> Result<AccountSettings, Error> {
        self.settings
            .find_by_user_id(requester)
            .await
            .map_err(map_account_settings_error)?
            .ok_or_else(|| {
                Error::entity_not_found_by(EntityKind::AccountSettings, requester, "userId")
            })
    }

    async fn resolve_color(
        &self,
        color_id: MountColorId,
        mount_type: MountType,
    ) -> Result<MountColor, Error> {
        let color = self
            .colors
            .find_by_id(&color_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::entity_not_found(EntityKind::MountColor, color_id))?;
        if color.mount_type != mount_type {
            return Err(color_mismatch(&color, mount_type));
        }
        Ok(color)
    }
}

#[async_trait]
impl<M, S, C> MountQuery for MountService<M, S, C>
where
    M: MountRepository,
    S: AccountSettingsRepository,
    C: MountColorRepository,
{
    async fn get_mount(&self, mount_id: MountId, requester: &UserId) -> Result<Mount, Error> {
        get_mount(self.mounts.as_ref(), mount_id, requester).await
    }

    async fn list_mounts(&self, requester: &UserId) -> Result<Vec<Mount>, Error> {
        self.mounts
            .list_by_owner(requester)
            .await
            .map_err(map_mount_repository_error)
    }
}

#[async_trait]
impl<M, S, C> MountCommand for MountService<M, S, C>
where
    M: MountRepository,
    S: AccountSettingsRepository,
    C: MountColorRepository,
{
    async fn create_mount(&self, requester: &UserId, mount: NewMount) -> Result<Mount, Error> {
        let settings = self.settings_for(requester).await?;
        verify_mount_type_allowed(&settings.mount_types, mount.mount_type)?;
        let color = self.resolve_color(mount.color_id, mount.mount_type).await?;

        let created = Mount::try_from(MountDraft {
            id: MountId::random(),
            user_id: requester.clone(),
            name: mount.name,
            gender: mount.gender,
            mount_type: mount.mount_type,
            color_id: color.id,
            color: color.names,
            max_number_of_child: mount.max_number_of_child,
            number_of_child: 0,
        })?;

        self.mounts
            .insert(&created)
            .await
            .map_err(map_mount_repository_error)?;
        tracing::debug!(mount_id = %created.id(), user_id = %requester, "mount created");
        Ok(created)
    }

    async fn update_mount(
        &self,
        mount_id: MountId,
        requester: &UserId,
        patch: MountPatch,
    ) -> Result<Mount, Error> {
        let current = get_mount(self.mounts.as_ref(), mount_id, requester).await?;

        let target_type = patch.mount_type.unwrap_or(current.mount_type());
        let retyped = target_type != current.mount_type();
        if retyped {
            let settings = self.settings_for(requester).await?;
            verify_mount_type_allowed(&settings.mount_types, target_type)?;
        }

        let color = match patch.color_id {
            Some(color_id) => Some(self.resolve_color(color_id, target_type).await?),
            None if retyped => {
                return Err(Error::invalid_request(
                    "a colour for the new mount type is required when changing type",
                )
                .with_details(json!({ "field": "colorId", "reason": "color_mismatch" })));
            }
            None => None,
        };

        let updated = current.apply(patch, color.as_ref())?;
        let matched = self
            .mounts
            .update(&updated)
            .await
            .map_err(map_mount_repository_error)?;
        if !matched {
            return Err(Error::entity_not_found(EntityKind::Mount, mount_id));
        }
        Ok(updated)
    }

    async fn delete_mount(&self, mount_id: MountId, requester: &UserId) -> Result<(), Error> {
        get_mount(self.mounts.as_ref(), mount_id, requester).await?;
        let removed = self
            .mounts
            .delete(&mount_id)
            .await
            .map_err(map_mount_repository_error)?;
        if !removed {
            return Err(Error::entity_not_found(EntityKind::Mount, mount_id));
        }
        tracing::debug!(%mount_id, user_id = %requester, "mount deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "mount_service_tests.rs"]
mod tests;
