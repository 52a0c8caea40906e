//! Port for account settings persistence.

use async_trait::async_trait;

use crate::domain::{AccountSettings, AccountSettingsId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account settings repository adapters.
    pub enum AccountSettingsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account settings repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account settings repository query failed: {message}",
        /// The user already has a settings record.
        DuplicateUser { user_id: String } =>
            "account settings already exist for user {user_id}",
    }
}

/// Storage for per-user settings. Owner ids are unique across records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountSettingsRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &AccountSettingsId,
    ) -> Result<Option<AccountSettings>, AccountSettingsRepositoryError>;

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountSettings>, AccountSettingsRepositoryError>;

    /// Insert a record, failing with
    /// [`AccountSettingsRepositoryError::DuplicateUser`] when the owner
    /// already has one.
    async fn insert(&self, settings: &AccountSettings)
    -> Result<(), AccountSettingsRepositoryError>;

    /// Replace a stored record. Returns `false` when no row matched.
    async fn update(
        &self,
        settings: &AccountSettings,
    ) -> Result<bool, AccountSettingsRepositoryError>;
}
