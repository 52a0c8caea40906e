//! Driving port for coupling reads and search.

use async_trait::async_trait;

use crate::domain::{Coupling, CouplingId, CouplingSearchCriteria, Error, UserId};

/// Use-case port for reading couplings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouplingQuery: Send + Sync {
    /// Fetch one coupling for its owner.
    ///
    /// # Errors
    /// `NotFound` when absent, `Forbidden` when owned by another user.
    async fn get_coupling(
        &self,
        coupling_id: CouplingId,
        requester: &UserId,
    ) -> Result<Coupling, Error>;

    /// Couplings owned by the requester matching every supplied prefix.
    ///
    /// Empty criteria return all of the requester's couplings.
    async fn search_couplings(
        &self,
        criteria: CouplingSearchCriteria,
        requester: &UserId,
    ) -> Result<Vec<Coupling>, Error>;
}
