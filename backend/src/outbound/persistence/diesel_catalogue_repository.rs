//! PostgreSQL-backed reference catalogues: servers and mount colours.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepositoryError, MountColorRepository, ServerDirectory};
use crate::domain::{LocalizedNames, MountColor, MountColorId, MountType};

use super::diesel_error_mapping::StoreFailure;
use super::models::{MountColorRow, MountColorUpdate, NewMountColorRow};
use super::pool::DbPool;
use super::schema::{mount_colors, servers};

fn map_failure(failure: impl Into<StoreFailure>) -> CatalogueRepositoryError {
    failure.into().into_port_error(
        CatalogueRepositoryError::connection,
        CatalogueRepositoryError::query,
    )
}

/// Diesel-backed [`ServerDirectory`].
#[derive(Clone)]
pub struct DieselServerDirectory {
    pool: DbPool,
}

impl DieselServerDirectory {
    /// Read servers through `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServerDirectory for DieselServerDirectory {
    async fn server_exists(&self, name: &str) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::select(diesel::dsl::exists(
            servers::table.filter(servers::name.eq(name)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_failure)
    }
}

/// Diesel-backed [`MountColorRepository`].
#[derive(Clone)]
pub struct DieselMountColorRepository {
    pool: DbPool,
}

impl DieselMountColorRepository {
    /// Read and write the catalogue through `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_color(row: MountColorRow) -> Result<MountColor, CatalogueRepositoryError> {
    let mount_type = row.mount_type.parse().map_err(|err| {
        CatalogueRepositoryError::query(format!("stored colour is invalid: {err}"))
    })?;
    Ok(MountColor {
        id: MountColorId::from_uuid(row.id),
        mount_type,
        names: LocalizedNames {
            en: row.name_en,
            fr: row.name_fr,
        },
    })
}

#[async_trait]
impl MountColorRepository for DieselMountColorRepository {
    async fn find_by_id(
        &self,
        id: &MountColorId,
    ) -> Result<Option<MountColor>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = mount_colors::table
            .filter(mount_colors::id.eq(*id.as_uuid()))
            .select(MountColorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_color).transpose()
    }

    async fn list_by_type(
        &self,
        mount_type: MountType,
    ) -> Result<Vec<MountColor>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<MountColorRow> = mount_colors::table
            .filter(mount_colors::mount_type.eq(mount_type.as_str()))
            .order((mount_colors::name_en.asc(), mount_colors::id.asc()))
            .select(MountColorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        rows.into_iter().map(row_to_color).collect()
    }

    async fn insert(&self, color: &MountColor) -> Result<(), CatalogueRepositoryError> {
        let row = NewMountColorRow {
            id: *color.id.as_uuid(),
            mount_type: color.mount_type.as_str(),
            name_en: &color.names.en,
            name_fr: &color.names.fr,
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(mount_colors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(())
    }

    async fn update(&self, color: &MountColor) -> Result<bool, CatalogueRepositoryError> {
        let changes = MountColorUpdate {
            mount_type: color.mount_type.as_str(),
            name_en: &color.names.en,
            name_fr: &color.names.fr,
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::update(
            mount_colors::table.filter(mount_colors::id.eq(*color.id.as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_failure)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &MountColorId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::delete(mount_colors::table.filter(mount_colors::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(affected > 0)
    }
}
