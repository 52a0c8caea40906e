//! PostgreSQL-backed `CouplingRepository` implementation.
//!
//! Parent snapshots are stored as JSONB. Prefix search runs `ILIKE` against
//! the denormalised `dad_name`/`mom_name` columns and `child_name`, with the
//! user-supplied prefix escaped so it only ever matches literally.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CouplingRepository, CouplingRepositoryError};
use crate::domain::{
    ChildName, Coupling, CouplingFilter, CouplingId, CouplingSearchField, Mount, UserId,
};

use super::diesel_error_mapping::StoreFailure;
use super::models::{CouplingRow, NewCouplingRow};
use super::pool::DbPool;
use super::schema::couplings;

/// Diesel-backed implementation of the `CouplingRepository` port.
#[derive(Clone)]
pub struct DieselCouplingRepository {
    pool: DbPool,
}

impl DieselCouplingRepository {
    /// Store couplings through `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> CouplingRepositoryError {
    failure.into().into_port_error(
        CouplingRepositoryError::connection,
        CouplingRepositoryError::query,
    )
}

/// Escape `LIKE` metacharacters and append the trailing wildcard.
///
/// PostgreSQL's default escape character is the backslash, so `\`, `%` and
/// `_` are each prefixed with one.
pub(crate) fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn snapshot_to_db(mount: &Mount) -> Result<serde_json::Value, CouplingRepositoryError> {
    serde_json::to_value(mount)
        .map_err(|err| CouplingRepositoryError::query(format!("failed to encode snapshot: {err}")))
}

fn snapshot_from_db(value: serde_json::Value) -> Result<Mount, CouplingRepositoryError> {
    serde_json::from_value(value)
        .map_err(|err| CouplingRepositoryError::query(format!("stored snapshot is invalid: {err}")))
}

fn row_to_coupling(row: CouplingRow) -> Result<Coupling, CouplingRepositoryError> {
    Coupling::new(
        CouplingId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        snapshot_from_db(row.dad)?,
        snapshot_from_db(row.mom)?,
        row.child_name.as_deref().and_then(ChildName::parse),
        row.created_at,
    )
    .map_err(|err| CouplingRepositoryError::query(format!("stored coupling is invalid: {err}")))
}

#[async_trait]
impl CouplingRepository for DieselCouplingRepository {
    async fn find_by_id(
        &self,
        id: &CouplingId,
    ) -> Result<Option<Coupling>, CouplingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = couplings::table
            .filter(couplings::id.eq(*id.as_uuid()))
            .select(CouplingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_coupling).transpose()
    }

    async fn insert(&self, coupling: &Coupling) -> Result<(), CouplingRepositoryError> {
        let row = NewCouplingRow {
            id: *coupling.id().as_uuid(),
            user_id: *coupling.user_id().as_uuid(),
            dad: snapshot_to_db(coupling.dad())?,
            mom: snapshot_to_db(coupling.mom())?,
            dad_name: coupling.dad().name(),
            mom_name: coupling.mom().name(),
            child_name: coupling.child_name().map(ChildName::as_str),
            created_at: coupling.created_at(),
        };
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(couplings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(())
    }

    async fn delete(&self, id: &CouplingId) -> Result<bool, CouplingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::delete(couplings::table.filter(couplings::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(affected > 0)
    }

    async fn search(
        &self,
        filter: &CouplingFilter,
    ) -> Result<Vec<Coupling>, CouplingRepositoryError> {
        let mut query = couplings::table
            .filter(couplings::user_id.eq(*filter.owner().as_uuid()))
            .into_boxed();

        for predicate in filter.predicates() {
            let pattern = like_prefix_pattern(predicate.prefix.as_str());
            query = match predicate.field {
                CouplingSearchField::ChildName => {
                    query.filter(couplings::child_name.ilike(pattern))
                }
                CouplingSearchField::DadName => query.filter(couplings::dad_name.ilike(pattern)),
                CouplingSearchField::MomName => query.filter(couplings::mom_name.ilike(pattern)),
            };
        }

        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<CouplingRow> = query
            .order((couplings::created_at.asc(), couplings::id.asc()))
            .select(CouplingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        rows.into_iter().map(row_to_coupling).collect()
    }
}
