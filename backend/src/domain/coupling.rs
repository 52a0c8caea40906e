//! Coupling records.
//!
//! A coupling pairs a male and a female mount of the same type. Both parents
//! are stored as value snapshots taken at creation time; later edits to, or
//! deletion of, the live mounts never reach an existing coupling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CouplingId, CouplingValidationError, Mount, UserId, validate_coupling};

/// Optional label naming the expected offspring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildName(String);

impl ChildName {
    /// Trim `raw`; blank input yields `None`.
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// The trimmed name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChildName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Persisted breeding record.
///
/// ## Invariants
/// - `dad` is male, `mom` is female, and both share a mount type.
/// - `dad`, `mom` and the coupling belong to the same user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupling {
    id: CouplingId,
    user_id: UserId,
    dad: Mount,
    mom: Mount,
    child_name: Option<ChildName>,
    created_at: DateTime<Utc>,
}

/// Errors raised when assembling a [`Coupling`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouplingError {
    /// The parents break a breeding rule.
    #[error(transparent)]
    Invalid(#[from] CouplingValidationError),
    /// A parent is owned by someone other than the coupling owner.
    #[error("parent mounts must belong to the coupling owner")]
    OwnerMismatch,
}

impl Coupling {
    /// Assemble a coupling, validating the pair and its ownership.
    ///
    /// Used both for new records and for rehydrating stored ones.
    pub fn new(
        id: CouplingId,
        user_id: UserId,
        dad: Mount,
        mom: Mount,
        child_name: Option<ChildName>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CouplingError> {
        validate_coupling(&dad, &mom)?;
        if dad.user_id() != &user_id || mom.user_id() != &user_id {
            return Err(CouplingError::OwnerMismatch);
        }
        Ok(Self {
            id,
            user_id,
            dad,
            mom,
            child_name,
            created_at,
        })
    }

    /// Coupling identifier.
    #[must_use]
    pub const fn id(&self) -> CouplingId {
        self.id
    }

    /// User who recorded the coupling.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Snapshot of the male parent taken at creation.
    #[must_use]
    pub const fn dad(&self) -> &Mount {
        &self.dad
    }

    /// Snapshot of the female parent taken at creation.
    #[must_use]
    pub const fn mom(&self) -> &Mount {
        &self.mom
    }

    /// Expected offspring name, if one was given.
    #[must_use]
    pub const fn child_name(&self) -> Option<&ChildName> {
        self.child_name.as_ref()
    }

    /// When the coupling was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
