//! Breeding compatibility and mount-type gating rules.
//!
//! These are pure functions over domain values. Services call them after the
//! relevant records have been fetched and ownership has been confirmed.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::json;

use super::{Error, Mount, MountGender, MountType};

/// Position a mount occupies in a coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRole {
    /// Male parent.
    Dad,
    /// Female parent.
    Mom,
}

impl ParentRole {
    /// Wire name used in error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dad => "dad",
            Self::Mom => "mom",
        }
    }

    /// Gender a mount must have to fill this role.
    #[must_use]
    pub const fn required_gender(self) -> MountGender {
        match self {
            Self::Dad => MountGender::Male,
            Self::Mom => MountGender::Female,
        }
    }
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a pair of mounts cannot be coupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CouplingValidationError {
    /// A parent does not have the gender its role requires.
    #[error("{role} mount has the wrong gender")]
    InvalidGender {
        /// Role whose gender is wrong.
        role: ParentRole,
    },
    /// Dad and mom are of different types.
    #[error("mount types are not the same")]
    TypeMismatch,
}

/// Check that `dad` and `mom` may be coupled.
///
/// Rules are evaluated in a fixed order and the first failure is returned:
/// dad gender, mom gender, then type equality.
///
/// # Examples
/// ```
/// use mount_manager::domain::{CouplingValidationError, ParentRole, validate_coupling};
/// # use mount_manager::domain::{LocalizedNames, Mount, MountColorId, MountDraft, MountGender, MountId, MountType, UserId};
/// # let mount = |gender, mount_type| Mount::try_from(MountDraft {
/// #     id: MountId::random(), user_id: UserId::random(), name: "m".into(), gender, mount_type,
/// #     color_id: MountColorId::random(),
/// #     color: LocalizedNames { en: "Red".into(), fr: "Rouge".into() },
/// #     max_number_of_child: 1, number_of_child: 0,
/// # }).expect("valid mount");
/// let dad = mount(MountGender::Female, MountType::Dragon);
/// let mom = mount(MountGender::Female, MountType::Wolf);
///
/// assert_eq!(
///     validate_coupling(&dad, &mom),
///     Err(CouplingValidationError::InvalidGender { role: ParentRole::Dad }),
/// );
/// ```
pub fn validate_coupling(dad: &Mount, mom: &Mount) -> Result<(), CouplingValidationError> {
    for (role, mount) in [(ParentRole::Dad, dad), (ParentRole::Mom, mom)] {
        if mount.gender() != role.required_gender() {
            return Err(CouplingValidationError::InvalidGender { role });
        }
    }
    if dad.mount_type() != mom.mount_type() {
        return Err(CouplingValidationError::TypeMismatch);
    }
    Ok(())
}

impl From<CouplingValidationError> for Error {
    fn from(value: CouplingValidationError) -> Self {
        let details = match value {
            CouplingValidationError::InvalidGender { role } => {
                json!({ "reason": "invalid_gender", "role": role.as_str() })
            }
            CouplingValidationError::TypeMismatch => json!({ "reason": "type_mismatch" }),
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// The requested mount type is not among the account's allowed types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("mount type {requested} is not enabled in the account settings")]
pub struct UnauthorizedMountType {
    /// Type the caller tried to use.
    pub requested: MountType,
}

/// Gate mount creation and retyping on the account's configured types.
pub fn verify_mount_type_allowed(
    allowed: &BTreeSet<MountType>,
    requested: MountType,
) -> Result<(), UnauthorizedMountType> {
    if allowed.contains(&requested) {
        Ok(())
    } else {
        Err(UnauthorizedMountType { requested })
    }
}

impl From<UnauthorizedMountType> for Error {
    fn from(value: UnauthorizedMountType) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": "type",
            "reason": "unauthorized_mount_type",
            "value": value.requested.as_str(),
        }))
    }
}
