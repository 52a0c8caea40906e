//! Mount aggregate and the colour catalogue it references.
//!
//! A mount is a breedable creature owned by one user. Its colour is copied
//! from the catalogue when the mount is created or recoloured, so a mount
//! (and any coupling snapshot of it) stays readable even if the catalogue
//! entry is later renamed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{Error, MountColorId, MountId, UserId};

/// Biological sex of a mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MountGender {
    /// Eligible as a dad.
    Male,
    /// Eligible as a mom.
    Female,
}

impl MountGender {
    /// Stable string form used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for MountGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of mount species.
///
/// # Examples
/// ```
/// use mount_manager::domain::MountType;
///
/// assert_eq!("Dragon".parse::<MountType>(), Ok(MountType::Dragon));
/// assert!("Unicorn".parse::<MountType>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum MountType {
    /// Dragon mounts.
    Dragon,
    /// Wolf mounts.
    Wolf,
}

impl MountType {
    /// Every supported mount type, in declaration order.
    pub const ALL: [Self; 2] = [Self::Dragon, Self::Wolf];

    /// Stable string form used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dragon => "Dragon",
            Self::Wolf => "Wolf",
        }
    }
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown enum string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {input}")]
pub struct ParseMountEnumError {
    kind: &'static str,
    input: String,
}

impl FromStr for MountType {
    type Err = ParseMountEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| ParseMountEnumError {
                kind: "mount type",
                input: s.to_owned(),
            })
    }
}

impl FromStr for MountGender {
    type Err = ParseMountEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            _ => Err(ParseMountEnumError {
                kind: "mount gender",
                input: s.to_owned(),
            }),
        }
    }
}

/// Colour name in each supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalizedNames {
    /// English name.
    pub en: String,
    /// French name.
    pub fr: String,
}

/// Catalogue entry describing one colour variant of a mount type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountColor {
    /// Catalogue identifier copied into mounts as `colorId`.
    pub id: MountColorId,
    /// Mount type this colour belongs to.
    pub mount_type: MountType,
    /// Display names copied into mounts as `color`.
    pub names: LocalizedNames,
}

/// Validation failures for catalogue colours.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountColorValidationError {
    /// A localized name was blank once trimmed.
    #[error("colour name ({locale}) must not be empty")]
    EmptyName {
        /// Locale key of the blank name.
        locale: &'static str,
    },
}

impl From<MountColorValidationError> for Error {
    fn from(value: MountColorValidationError) -> Self {
        let MountColorValidationError::EmptyName { locale } = &value;
        let details = json!({ "field": format!("names.{locale}"), "reason": "empty_name" });
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// Type and names supplied when adding or replacing a catalogue colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountColorDraft {
    /// Mount type the colour applies to.
    pub mount_type: MountType,
    /// Display names; both locales are required.
    pub names: LocalizedNames,
}

impl MountColor {
    /// Build a catalogue entry from `draft`, trimming both names.
    ///
    /// # Errors
    /// [`MountColorValidationError::EmptyName`] when either name is blank.
    ///
    /// # Examples
    /// ```
    /// use mount_manager::domain::{
    ///     LocalizedNames, MountColor, MountColorDraft, MountColorId, MountType,
    /// };
    ///
    /// let draft = MountColorDraft {
    ///     mount_type: MountType::Wolf,
    ///     names: LocalizedNames { en: " Snow ".into(), fr: "Neige".into() },
    /// };
    /// let color = MountColor::from_draft(MountColorId::random(), draft).expect("valid");
    /// assert_eq!(color.names.en, "Snow");
    /// ```
    pub fn from_draft(
        id: MountColorId,
        draft: MountColorDraft,
    ) -> Result<Self, MountColorValidationError> {
        let name = |raw: &str, locale: &'static str| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(MountColorValidationError::EmptyName { locale })
            } else {
                Ok(trimmed.to_owned())
            }
        };
        Ok(Self {
            id,
            mount_type: draft.mount_type,
            names: LocalizedNames {
                en: name(&draft.names.en, "en")?,
                fr: name(&draft.names.fr, "fr")?,
            },
        })
    }
}

/// Largest `maxNumberOfChild` a mount may declare.
///
/// Storage keeps child counts in signed 32-bit columns, so the domain caps
/// capacity at `i32::MAX` and every adapter accepts the same range.
pub const MAX_CHILD_CAPACITY: u32 = i32::MAX.unsigned_abs();

/// Validation failures for mount invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountValidationError {
    /// The name was blank once trimmed.
    #[error("mount name must not be empty")]
    EmptyName,
    /// More children recorded than the mount's capacity allows.
    #[error("number of children {count} exceeds the maximum of {max}")]
    ChildCapacityExceeded {
        /// Requested `numberOfChild`.
        count: u32,
        /// Requested or stored `maxNumberOfChild`.
        max: u32,
    },
    /// Declared capacity is above [`MAX_CHILD_CAPACITY`].
    #[error("maximum number of children {max} is above the limit of {MAX_CHILD_CAPACITY}")]
    ChildCapacityOutOfRange {
        /// Requested `maxNumberOfChild`.
        max: u32,
    },
}

impl From<MountValidationError> for Error {
    fn from(value: MountValidationError) -> Self {
        let details = match &value {
            MountValidationError::EmptyName => json!({ "field": "name", "reason": "empty_name" }),
            MountValidationError::ChildCapacityExceeded { count, max } => json!({
                "field": "numberOfChild",
                "reason": "child_capacity_exceeded",
                "numberOfChild": count,
                "maxNumberOfChild": max,
            }),
            MountValidationError::ChildCapacityOutOfRange { max } => json!({
                "field": "maxNumberOfChild",
                "reason": "child_capacity_out_of_range",
                "maxNumberOfChild": max,
                "limit": MAX_CHILD_CAPACITY,
            }),
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// Unvalidated mount fields.
///
/// Converted into a [`Mount`] with [`Mount::try_from`], which enforces the
/// naming and capacity invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountDraft {
    /// Mount identifier.
    pub id: MountId,
    /// Owner.
    pub user_id: UserId,
    /// Display name; trimmed during validation.
    pub name: String,
    /// Biological sex.
    pub gender: MountGender,
    /// Species, serialised as `type`.
    #[serde(rename = "type")]
    pub mount_type: MountType,
    /// Catalogue colour the names were copied from.
    pub color_id: MountColorId,
    /// Copied colour names.
    pub color: LocalizedNames,
    /// Capacity, at most [`MAX_CHILD_CAPACITY`].
    pub max_number_of_child: u32,
    /// Children recorded so far.
    pub number_of_child: u32,
}

/// A breedable creature owned by a user.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `number_of_child <= max_number_of_child`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MountDraft", into = "MountDraft")]
pub struct Mount {
    id: MountId,
    user_id: UserId,
    name: String,
    gender: MountGender,
    mount_type: MountType,
    color_id: MountColorId,
    color: LocalizedNames,
    max_number_of_child: u32,
    number_of_child: u32,
}

impl Mount {
    /// Mount identifier.
    #[must_use]
    pub const fn id(&self) -> MountId {
        self.id
    }

    /// Owner of the mount.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Trimmed, non-empty display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Biological sex.
    #[must_use]
    pub const fn gender(&self) -> MountGender {
        self.gender
    }

    /// Species.
    #[must_use]
    pub const fn mount_type(&self) -> MountType {
        self.mount_type
    }

    /// Catalogue colour the names were copied from. The entry may since
    /// have been edited or removed.
    #[must_use]
    pub const fn color_id(&self) -> MountColorId {
        self.color_id
    }

    /// Colour names copied from the catalogue.
    #[must_use]
    pub const fn color(&self) -> &LocalizedNames {
        &self.color
    }

    /// Maximum number of children.
    #[must_use]
    pub const fn max_number_of_child(&self) -> u32 {
        self.max_number_of_child
    }

    /// Children recorded so far.
    #[must_use]
    pub const fn number_of_child(&self) -> u32 {
        self.number_of_child
    }

    /// Apply a partial update, re-checking every invariant.
    ///
    /// The colour snapshot is only replaced when `color` is supplied; the
    /// caller is responsible for resolving it against the catalogue first.
    pub fn apply(self, patch: MountPatch, color: Option<&MountColor>) -> Result<Self, MountValidationError> {
        let mut draft = MountDraft::from(self);
        if let Some(name) = patch.name {
            draft.name = name;
        }
        if let Some(gender) = patch.gender {
            draft.gender = gender;
        }
        if let Some(mount_type) = patch.mount_type {
            draft.mount_type = mount_type;
        }
        if let Some(color) = color {
            draft.color_id = color.id;
            draft.color = color.names.clone();
        }
        if let Some(max) = patch.max_number_of_child {
            draft.max_number_of_child = max;
        }
        if let Some(count) = patch.number_of_child {
            draft.number_of_child = count;
        }
        Mount::try_from(draft)
    }
}

impl TryFrom<MountDraft> for Mount {
    type Error = MountValidationError;

    fn try_from(value: MountDraft) -> Result<Self, Self::Error> {
        let name = value.name.trim();
        if name.is_empty() {
            return Err(MountValidationError::EmptyName);
        }
        if value.max_number_of_child > MAX_CHILD_CAPACITY {
            return Err(MountValidationError::ChildCapacityOutOfRange {
                max: value.max_number_of_child,
            });
        }
        if value.number_of_child > value.max_number_of_child {
            return Err(MountValidationError::ChildCapacityExceeded {
                count: value.number_of_child,
                max: value.max_number_of_child,
            });
        }
        Ok(Self {
            id: value.id,
            user_id: value.user_id,
            name: name.to_owned(),
            gender: value.gender,
            mount_type: value.mount_type,
            color_id: value.color_id,
            color: value.color,
            max_number_of_child: value.max_number_of_child,
            number_of_child: value.number_of_child,
        })
    }
}

impl From<Mount> for MountDraft {
    fn from(value: Mount) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            name: value.name,
            gender: value.gender,
            mount_type: value.mount_type,
            color_id: value.color_id,
            color: value.color,
            max_number_of_child: value.max_number_of_child,
            number_of_child: value.number_of_child,
        }
    }
}

/// Fields supplied when creating a mount. The owner comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMount {
    /// Display name.
    pub name: String,
    /// Biological sex.
    pub gender: MountGender,
    /// Species; must be enabled in the owner's settings.
    pub mount_type: MountType,
    /// Catalogue colour of the same species.
    pub color_id: MountColorId,
    /// Capacity, at most [`MAX_CHILD_CAPACITY`].
    pub max_number_of_child: u32,
}

/// Partial mount update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPatch {
    /// New display name.
    pub name: Option<String>,
    /// New sex.
    pub gender: Option<MountGender>,
    /// New species; requires a `color_id` of that species.
    pub mount_type: Option<MountType>,
    /// New catalogue colour.
    pub color_id: Option<MountColorId>,
    /// New capacity.
    pub max_number_of_child: Option<u32>,
    /// New child count.
    pub number_of_child: Option<u32>,
}
