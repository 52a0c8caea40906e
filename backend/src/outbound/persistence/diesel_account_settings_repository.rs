//! PostgreSQL-backed `AccountSettingsRepository` implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountSettingsRepository, AccountSettingsRepositoryError};
use crate::domain::{AccountSettings, AccountSettingsId, MountType, UserId};

use super::diesel_error_mapping::StoreFailure;
use super::models::{AccountSettingsRow, AccountSettingsUpdate};
use super::pool::DbPool;
use super::schema::account_settings;

/// Diesel-backed implementation of the `AccountSettingsRepository` port.
#[derive(Clone)]
pub struct DieselAccountSettingsRepository {
    pool: DbPool,
}

impl DieselAccountSettingsRepository {
    /// Store settings through `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> AccountSettingsRepositoryError {
    failure.into().into_port_error(
        AccountSettingsRepositoryError::connection,
        AccountSettingsRepositoryError::query,
    )
}

fn map_insert_failure(failure: impl Into<StoreFailure>, owner: &UserId) -> AccountSettingsRepositoryError {
    match failure.into() {
        StoreFailure::UniqueViolation(_) => {
            AccountSettingsRepositoryError::duplicate_user(owner.to_string())
        }
        other => map_failure(other),
    }
}

fn types_to_db(types: &BTreeSet<MountType>) -> Vec<String> {
    types.iter().map(|t| t.as_str().to_owned()).collect()
}

fn row_to_settings(row: AccountSettingsRow) -> Result<AccountSettings, AccountSettingsRepositoryError> {
    let mount_types = row
        .mount_types
        .iter()
        .map(|raw| raw.parse::<MountType>())
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(|err| {
            AccountSettingsRepositoryError::query(format!("stored settings are invalid: {err}"))
        })?;
    Ok(AccountSettings {
        id: AccountSettingsId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        mount_types,
        server_name: row.server_name,
        ig_username: row.ig_username,
        auto_fill_child_name: row.auto_fill_child_name,
    })
}

#[async_trait]
impl AccountSettingsRepository for DieselAccountSettingsRepository {
    async fn find_by_id(
        &self,
        id: &AccountSettingsId,
    ) -> Result<Option<AccountSettings>, AccountSettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = account_settings::table
            .filter(account_settings::id.eq(*id.as_uuid()))
            .select(AccountSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_settings).transpose()
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountSettings>, AccountSettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = account_settings::table
            .filter(account_settings::user_id.eq(*user_id.as_uuid()))
            .select(AccountSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_settings).transpose()
    }

    async fn insert(
        &self,
        settings: &AccountSettings,
    ) -> Result<(), AccountSettingsRepositoryError> {
        let row = AccountSettingsRow {
            id: *settings.id.as_uuid(),
            user_id: *settings.user_id.as_uuid(),
            mount_types: types_to_db(&settings.mount_types),
            server_name: settings.server_name.clone(),
            ig_username: settings.ig_username.clone(),
            auto_fill_child_name: settings.auto_fill_child_name,
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(account_settings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_failure(err, &settings.user_id))?;
        Ok(())
    }

    async fn update(
        &self,
        settings: &AccountSettings,
    ) -> Result<bool, AccountSettingsRepositoryError> {
        let changes = AccountSettingsUpdate {
            mount_types: types_to_db(&settings.mount_types),
            server_name: settings.server_name.as_deref(),
            ig_username: settings.ig_username.as_deref(),
            auto_fill_child_name: settings.auto_fill_child_name,
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::update(
            account_settings::table.filter(account_settings::id.eq(*settings.id.as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_failure)?;
        Ok(affected > 0)
    }
}
