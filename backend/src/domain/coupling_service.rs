//! Coupling use cases: create, fetch, delete and search.
//!
//! Each call issues its own store operations; parent lookup and coupling
//! insert are not wrapped in a transaction. Two concurrent creates over the
//! same parents both succeed, and parent child counts are left untouched.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::mount_lookup::get_mount;
use crate::domain::ports::{
    CouplingCommand, CouplingQuery, CouplingRepository, CouplingRepositoryError,
    CreateCouplingRequest, MountRepository,
};
use crate::domain::{
    Coupling, CouplingError, CouplingFilter, CouplingId, CouplingSearchCriteria, EntityKind,
    Error, UserId, assert_owned,
};

fn map_coupling_repository_error(error: CouplingRepositoryError) -> Error {
    match error {
        CouplingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("coupling repository unavailable: {message}"))
        }
        CouplingRepositoryError::Query { message } => {
            Error::internal(format!("coupling repository error: {message}"))
        }
    }
}

impl From<CouplingError> for Error {
    fn from(value: CouplingError) -> Self {
        match value {
            CouplingError::Invalid(reason) => reason.into(),
            CouplingError::OwnerMismatch => Error::internal(value.to_string()),
        }
    }
}

/// Coupling service implementing [`CouplingQuery`] and [`CouplingCommand`].
#[derive(Clone)]
pub struct CouplingService<C, M> {
    couplings: Arc<C>,
    mounts: Arc<M>,
}

impl<C, M> CouplingService<C, M> {
    /// Wire the service to its coupling and mount stores.
    #[must_use]
    pub const fn new(couplings: Arc<C>, mounts: Arc<M>) -> Self {
        Self { couplings, mounts }
    }
}

impl<C, M> CouplingService<C, M>
where
    C: CouplingRepository,
    M: MountRepository,
{
    async fn owned_coupling(
        &self,
        coupling_id: CouplingId,
        requester: &UserId,
    ) -> Result<Coupling, Error> {
        let coupling = self
            .couplings
            .find_by_id(&coupling_id)
            .await
            .map_err(map_coupling_repository_error)?
            .ok_or_else(|| Error::entity_not_found(EntityKind::Coupling, coupling_id))?;
        assert_owned(&coupling, requester)?;
        Ok(coupling)
    }
}

#[async_trait]
impl<C, M> CouplingQuery for CouplingService<C, M>
where
    C: CouplingRepository,
    M: MountRepository,
{
    async fn get_coupling(
        &self,
        coupling_id: CouplingId,
        requester: &UserId,
    ) -> Result<Coupling, Error> {
        self.owned_coupling(coupling_id, requester).await
    }

    async fn search_couplings(
        &self,
        criteria: CouplingSearchCriteria,
        requester: &UserId,
    ) -> Result<Vec<Coupling>, Error> {
        let filter = CouplingFilter::new(requester.clone(), criteria);
        self.couplings
            .search(&filter)
            .await
            .map_err(map_coupling_repository_error)
    }
}

#[async_trait]
impl<C, M> CouplingCommand for CouplingService<C, M>
where
    C: CouplingRepository,
    M: MountRepository,
{
    async fn create_coupling(
        &self,
        request: CreateCouplingRequest,
        requester: &UserId,
    ) -> Result<Coupling, Error> {
        let dad = get_mount(self.mounts.as_ref(), request.dad_id, requester).await?;
        let mom = get_mount(self.mounts.as_ref(), request.mom_id, requester).await?;

        let coupling = Coupling::new(
            CouplingId::random(),
            requester.clone(),
            dad,
            mom,
            request.child_name,
            Utc::now(),
        )?;

        self.couplings
            .insert(&coupling)
            .await
            .map_err(map_coupling_repository_error)?;
        tracing::debug!(
            coupling_id = %coupling.id(),
            dad_id = %request.dad_id,
            mom_id = %request.mom_id,
            "coupling created"
        );
        Ok(coupling)
    }

    async fn delete_coupling(
        &self,
        coupling_id: CouplingId,
        requester: &UserId,
    ) -> Result<(), Error> {
        self.owned_coupling(coupling_id, requester).await?;
        let removed = self
            .couplings
            .delete(&coupling_id)
            .await
            .map_err(map_coupling_repository_error)?;
        if !removed {
            return Err(Error::entity_not_found(EntityKind::Coupling, coupling_id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "coupling_service_tests.rs"]
mod tests;
