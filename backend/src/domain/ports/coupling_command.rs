//! Driving port for coupling mutations.

use async_trait::async_trait;

use crate::domain::{ChildName, Coupling, CouplingId, Error, MountId, UserId};

/// Request to pair two of the requester's mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCouplingRequest {
    /// Male parent, owned by the requester.
    pub dad_id: MountId,
    /// Female parent, owned by the requester.
    pub mom_id: MountId,
    /// Expected offspring name.
    pub child_name: Option<ChildName>,
}

/// Use-case port for creating and deleting couplings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouplingCommand: Send + Sync {
    /// Look up both parents, validate the pair, and persist a coupling
    /// embedding snapshots of them.
    ///
    /// # Errors
    /// - `NotFound` or `Forbidden` from either parent lookup, dad first.
    /// - `InvalidRequest` with reason `invalid_gender` or `type_mismatch`.
    async fn create_coupling(
        &self,
        request: CreateCouplingRequest,
        requester: &UserId,
    ) -> Result<Coupling, Error>;

    /// Delete a coupling after confirming it exists and is owned by the
    /// requester.
    async fn delete_coupling(&self, coupling_id: CouplingId, requester: &UserId)
    -> Result<(), Error>;
}
