//! Driving port for reading account settings.

use async_trait::async_trait;

use crate::domain::{AccountSettings, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountSettingsQuery: Send + Sync {
    /// Settings of the requester.
    ///
    /// # Errors
    /// `NotFound` keyed by `userId` when the requester has none yet.
    async fn fetch_account_settings(&self, requester: &UserId) -> Result<AccountSettings, Error>;
}
