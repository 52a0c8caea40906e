//! Account settings use cases.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::mount_color_service::map_catalogue_error;
use crate::domain::ports::{
    AccountSettingsCommand, AccountSettingsQuery, AccountSettingsRepository,
    AccountSettingsRepositoryError, ServerDirectory,
};
use crate::domain::{
    AccountSettings, AccountSettingsId, AccountSettingsPatch, EntityKind, Error, MountType, UserId,
    assert_owned,
};

pub(crate) fn map_account_settings_error(error: AccountSettingsRepositoryError) -> Error {
    match error {
        AccountSettingsRepositoryError::Connection { message } => Error::service_unavailable(
            format!("account settings repository unavailable: {message}"),
        ),
        AccountSettingsRepositoryError::Query { message } => {
            Error::internal(format!("account settings repository error: {message}"))
        }
        AccountSettingsRepositoryError::DuplicateUser { user_id } => {
            Error::conflict("account settings already exist for this user").with_details(json!({
                "entity": EntityKind::AccountSettings.as_str(),
                "key": user_id,
                "field": "userId",
            }))
        }
    }
}

/// Account settings service implementing [`AccountSettingsQuery`] and
/// [`AccountSettingsCommand`].
#[derive(Clone)]
pub struct AccountSettingsService<R, D> {
    settings: Arc<R>,
    servers: Arc<D>,
}

impl<R, D> AccountSettingsService<R, D> {
    /// Wire the service to the settings store and server directory.
    #[must_use]
    pub const fn new(settings: Arc<R>, servers: Arc<D>) -> Self {
        Self { settings, servers }
    }
}

impl<R, D> AccountSettingsService<R, D>
where
    R: AccountSettingsRepository,
    D: ServerDirectory,
{
    async fn validate_server_name(&self, server_name: &str) -> Result<(), Error> {
        let exists = self
            .servers
            .server_exists(server_name)
            .await
            .map_err(map_catalogue_error)?;
        if exists {
            Ok(())
        } else {
            Err(
                Error::invalid_request("serverName is invalid, the requested server doesn't exist")
                    .with_details(json!({
                        "field": "serverName",
                        "reason": "invalid_server_name",
                        "value": server_name,
                    })),
            )
        }
    }
}

#[async_trait]
impl<R, D> AccountSettingsQuery for AccountSettingsService<R, D>
where
    R: AccountSettingsRepository,
    D: ServerDirectory,
{
    async fn fetch_account_settings(&self, requester: &UserId) -> Result<AccountSettings, Error> {
        self.settings
            .find_by_user_id(requester)
            .await
            .map_err(map_account_settings_error)?
            .ok_or_else(|| {
                Error::entity_not_found_by(EntityKind::AccountSettings, requester, "userId")
            })
    }
}

#[async_trait]
impl<R, D> AccountSettingsCommand for AccountSettingsService<R, D>
where
    R: AccountSettingsRepository,
    D: ServerDirectory,
{
    async fn create_account_settings(
        &self,
        requester: &UserId,
        mount_types: BTreeSet<MountType>,
    ) -> Result<AccountSettings, Error> {
        let settings =
            AccountSettings::new_default(AccountSettingsId::random(), requester.clone(), mount_types);
        self.settings
            .insert(&settings)
            .await
            .map_err(map_account_settings_error)?;
        tracing::debug!(settings_id = %settings.id, user_id = %requester, "account settings created");
        Ok(settings)
    }

    async fn update_account_settings(
        &self,
        settings_id: AccountSettingsId,
        requester: &UserId,
        patch: AccountSettingsPatch,
    ) -> Result<AccountSettings, Error> {
        if let Some(server_name) = patch.server_name.as_deref() {
            self.validate_server_name(server_name).await?;
        }

        let mut settings = self
            .settings
            .find_by_id(&settings_id)
            .await
            .map_err(map_account_settings_error)?
            .ok_or_else(|| Error::entity_not_found(EntityKind::AccountSettings, settings_id))?;
        assert_owned(&settings, requester)?;

        settings.apply(patch);
        let matched = self
            .settings
            .update(&settings)
            .await
            .map_err(map_account_settings_error)?;
        if !matched {
            return Err(Error::entity_not_found(EntityKind::AccountSettings, settings_id));
        }
        Ok(settings)
    }
}
