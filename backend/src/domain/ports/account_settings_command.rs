//! Driving port for account settings mutations.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{
    AccountSettings, AccountSettingsId, AccountSettingsPatch, Error, MountType, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountSettingsCommand: Send + Sync {
    /// Create default settings for the requester with the given mount types.
    ///
    /// # Errors
    /// `Conflict` when the requester already has settings.
    async fn create_account_settings(
        &self,
        requester: &UserId,
        mount_types: BTreeSet<MountType>,
    ) -> Result<AccountSettings, Error>;

    /// Apply a partial update.
    ///
    /// A supplied server name is validated before the record is even
    /// looked up; then existence and ownership are checked in that order.
    async fn update_account_settings(
        &self,
        settings_id: AccountSettingsId,
        requester: &UserId,
        patch: AccountSettingsPatch,
    ) -> Result<AccountSettings, Error>;
}
