//! PostgreSQL-backed `MountRepository` implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MountRepository, MountRepositoryError};
use crate::domain::{Mount, MountColorId, MountDraft, MountId, UserId};

use super::diesel_error_mapping::StoreFailure;
use super::models::{MountRow, MountUpdate, NewMountRow};
use super::pool::DbPool;
use super::schema::mounts;

/// Diesel-backed implementation of the `MountRepository` port.
#[derive(Clone)]
pub struct DieselMountRepository {
    pool: DbPool,
}

impl DieselMountRepository {
    /// Store mounts through `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> MountRepositoryError {
    failure.into().into_port_error(
        MountRepositoryError::connection,
        MountRepositoryError::query,
    )
}

fn count_to_db(value: u32) -> Result<i32, MountRepositoryError> {
    i32::try_from(value).map_err(|_| MountRepositoryError::query("child count out of range"))
}

fn count_from_db(value: i32) -> Result<u32, MountRepositoryError> {
    u32::try_from(value).map_err(|_| MountRepositoryError::query("negative child count stored"))
}

fn color_to_db(mount: &Mount) -> Result<serde_json::Value, MountRepositoryError> {
    serde_json::to_value(mount.color())
        .map_err(|err| MountRepositoryError::query(format!("failed to encode colour: {err}")))
}

/// Convert a database row into a domain mount, re-validating invariants.
pub(crate) fn row_to_mount(row: MountRow) -> Result<Mount, MountRepositoryError> {
    let corrupt = |what: &str| MountRepositoryError::query(format!("stored mount has {what}"));

    let draft = MountDraft {
        id: MountId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        name: row.name,
        gender: row.gender.parse().map_err(|_| corrupt("an unknown gender"))?,
        mount_type: row.mount_type.parse().map_err(|_| corrupt("an unknown type"))?,
        color_id: MountColorId::from_uuid(row.color_id),
        color: serde_json::from_value(row.color).map_err(|_| corrupt("a malformed colour"))?,
        max_number_of_child: count_from_db(row.max_number_of_child)?,
        number_of_child: count_from_db(row.number_of_child)?,
    };
    Mount::try_from(draft).map_err(|err| corrupt(&format!("invalid fields: {err}")))
}

#[async_trait]
impl MountRepository for DieselMountRepository {
    async fn find_by_id(&self, id: &MountId) -> Result<Option<Mount>, MountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = mounts::table
            .filter(mounts::id.eq(*id.as_uuid()))
            .select(MountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_mount).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Mount>, MountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<MountRow> = mounts::table
            .filter(mounts::user_id.eq(*owner.as_uuid()))
            .order((mounts::name.asc(), mounts::id.asc()))
            .select(MountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        rows.into_iter().map(row_to_mount).collect()
    }

    async fn insert(&self, mount: &Mount) -> Result<(), MountRepositoryError> {
        let row = NewMountRow {
            id: *mount.id().as_uuid(),
            user_id: *mount.user_id().as_uuid(),
            name: mount.name(),
            gender: mount.gender().as_str(),
            mount_type: mount.mount_type().as_str(),
            color_id: *mount.color_id().as_uuid(),
            color: color_to_db(mount)?,
            max_number_of_child: count_to_db(mount.max_number_of_child())?,
            number_of_child: count_to_db(mount.number_of_child())?,
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(mounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(())
    }

    async fn update(&self, mount: &Mount) -> Result<bool, MountRepositoryError> {
        let changes = MountUpdate {
            name: mount.name(),
            gender: mount.gender().as_str(),
            mount_type: mount.mount_type().as_str(),
            color_id: *mount.color_id().as_uuid(),
            color: color_to_db(mount)?,
            max_number_of_child: count_to_db(mount.max_number_of_child())?,
            number_of_child: count_to_db(mount.number_of_child())?,
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::update(mounts::table.filter(mounts::id.eq(*mount.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &MountId) -> Result<bool, MountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::delete(mounts::table.filter(mounts::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MountGender, MountType};
    use rstest::{fixture, rstest};
    use serde_json::json;
    use uuid::Uuid;

    #[fixture]
    fn row() -> MountRow {
        MountRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Sparky".into(),
            gender: "Male".into(),
            mount_type: "Dragon".into(),
            color_id: Uuid::new_v4(),
            color: json!({ "en": "Golden", "fr": "Dorée" }),
            max_number_of_child: 4,
            number_of_child: 1,
        }
    }

    #[rstest]
    fn converts_valid_row(row: MountRow) {
        let mount = row_to_mount(row).expect("valid row");
        assert_eq!(mount.gender(), MountGender::Male);
        assert_eq!(mount.mount_type(), MountType::Dragon);
        assert_eq!(mount.color().fr, "Dorée");
        assert_eq!(mount.number_of_child(), 1);
    }

    #[rstest]
    fn rejects_unknown_gender(mut row: MountRow) {
        row.gender = "Other".into();
        let err = row_to_mount(row).expect_err("bad gender");
        assert!(matches!(err, MountRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rejects_negative_counts(mut row: MountRow) {
        row.number_of_child = -1;
        assert!(row_to_mount(row).is_err());
    }

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let err = map_failure(super::super::pool::PoolError::checkout("refused"));
        assert_eq!(err, MountRepositoryError::connection("refused"));
    }
}
