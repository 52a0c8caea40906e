//! Domain primitives, aggregates and services.
//!
//! Purpose: define the mount, coupling and account settings model, the
//! breeding and ownership rules over it, and the services implementing the
//! driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure with a stable code.
//! - Mount, Coupling, AccountSettings: aggregates with their invariants.
//! - validate_coupling, verify_mount_type_allowed, assert_owned: pure rules.
//! - MountService, MountColorService, CouplingService, AccountSettingsService:
//!   use cases.

pub mod account_settings;
pub mod account_settings_service;
pub mod coupling;
pub mod coupling_search;
pub mod coupling_service;
pub mod error;
pub mod ids;
pub mod mount;
pub mod mount_color_service;
pub mod mount_lookup;
pub mod mount_service;
pub mod ownership;
pub mod ports;
pub mod rules;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;

pub use self::account_settings::{AccountSettings, AccountSettingsPatch};
pub use self::account_settings_service::AccountSettingsService;
pub use self::coupling::{ChildName, Coupling, CouplingError};
pub use self::coupling_search::{
    CouplingFilter, CouplingSearchCriteria, CouplingSearchField, PrefixPredicate, SearchPrefix,
};
pub use self::coupling_service::CouplingService;
pub use self::error::{EntityKind, Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{AccountSettingsId, CouplingId, MountColorId, MountId};
pub use self::mount::{
    LocalizedNames, MAX_CHILD_CAPACITY, Mount, MountColor, MountColorDraft,
    MountColorValidationError, MountDraft, MountGender, MountPatch, MountType,
    MountValidationError, NewMount, ParseMountEnumError,
};
pub use self::mount_color_service::MountColorService;
pub use self::mount_lookup::get_mount;
pub use self::mount_service::MountService;
pub use self::ownership::{AccessDenied, Owned, assert_owned};
pub use self::rules::{
    CouplingValidationError, ParentRole, UnauthorizedMountType, validate_coupling,
    verify_mount_type_allowed,
};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserIdError};
