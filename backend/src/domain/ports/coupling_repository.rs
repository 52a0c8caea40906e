//! Port for coupling persistence and search.

use async_trait::async_trait;

use crate::domain::{Coupling, CouplingFilter, CouplingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by coupling repository adapters.
    pub enum CouplingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "coupling repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "coupling repository query failed: {message}",
    }
}

/// Storage for couplings and their embedded parent snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouplingRepository: Send + Sync {
    /// Fetch a coupling by id. `None` when absent.
    async fn find_by_id(&self, id: &CouplingId)
    -> Result<Option<Coupling>, CouplingRepositoryError>;

    /// Persist a new coupling including both parent snapshots.
    async fn insert(&self, coupling: &Coupling) -> Result<(), CouplingRepositoryError>;

    /// Remove a coupling. Returns `false` when no row matched.
    async fn delete(&self, id: &CouplingId) -> Result<bool, CouplingRepositoryError>;

    /// Couplings matching every predicate of `filter`, oldest first.
    ///
    /// Prefix predicates are case-insensitive and must match the prefix
    /// literally, including any pattern metacharacters it contains.
    async fn search(&self, filter: &CouplingFilter)
    -> Result<Vec<Coupling>, CouplingRepositoryError>;
}
