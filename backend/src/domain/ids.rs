//! Typed identifiers for persisted entities.
//!
//! Each entity gets its own UUID newtype so that a coupling id can never be
//! passed where a mount id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a [`Mount`](crate::domain::Mount).
    MountId
);
define_entity_id!(
    /// Identifier of a [`Coupling`](crate::domain::Coupling).
    CouplingId
);
define_entity_id!(
    /// Identifier of an [`AccountSettings`](crate::domain::AccountSettings) record.
    AccountSettingsId
);
define_entity_id!(
    /// Identifier of a [`MountColor`](crate::domain::MountColor) catalogue entry.
    MountColorId
);
