//! Ownership guard shared by every per-entity service.
//!
//! Existence is always checked first: a missing record is `NotFound`, a
//! record belonging to someone else is `Forbidden`.

use serde_json::json;

use super::{AccountSettings, Coupling, Error, Mount, UserId};

/// Entities that belong to exactly one user.
pub trait Owned {
    fn owner(&self) -> &UserId;
}

impl Owned for Mount {
    fn owner(&self) -> &UserId {
        self.user_id()
    }
}

impl Owned for Coupling {
    fn owner(&self) -> &UserId {
        self.user_id()
    }
}

impl Owned for AccountSettings {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

/// The requester does not own the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("you do not have access to this resource")]
pub struct AccessDenied;

/// Verify that `requester` owns `entity`.
pub fn assert_owned<E: Owned + ?Sized>(entity: &E, requester: &UserId) -> Result<(), AccessDenied> {
    if entity.owner() == requester {
        Ok(())
    } else {
        Err(AccessDenied)
    }
}

impl From<AccessDenied> for Error {
    fn from(value: AccessDenied) -> Self {
        Error::forbidden(value.to_string()).with_details(json!({ "reason": "access_denied" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountSettingsId, ErrorCode};

    #[test]
    fn owner_passes_and_stranger_is_denied() {
        let owner = UserId::random();
        let settings = AccountSettings::new_default(AccountSettingsId::random(), owner.clone(), []);

        assert_eq!(assert_owned(&settings, &owner), Ok(()));
        assert_eq!(assert_owned(&settings, &UserId::random()), Err(AccessDenied));
    }

    #[test]
    fn access_denied_maps_to_forbidden() {
        let err = Error::from(AccessDenied);
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
