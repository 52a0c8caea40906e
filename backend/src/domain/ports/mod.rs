//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ServerDirectory`]) are implemented by
//! outbound adapters. Driving ports (`*Query`, `*Command`) are implemented
//! by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_settings_command;
mod account_settings_query;
mod account_settings_repository;
mod catalogue_repository;
mod coupling_command;
mod coupling_query;
mod coupling_repository;
mod mount_color_command;
mod mount_command;
mod mount_query;
mod mount_repository;

pub use account_settings_command::AccountSettingsCommand;
#[cfg(test)]
pub use account_settings_command::MockAccountSettingsCommand;
pub use account_settings_query::AccountSettingsQuery;
#[cfg(test)]
pub use account_settings_query::MockAccountSettingsQuery;
#[cfg(test)]
pub use account_settings_repository::MockAccountSettingsRepository;
pub use account_settings_repository::{AccountSettingsRepository, AccountSettingsRepositoryError};
#[cfg(test)]
pub use catalogue_repository::{MockMountColorRepository, MockServerDirectory};
pub use catalogue_repository::{CatalogueRepositoryError, MountColorRepository, ServerDirectory};
#[cfg(test)]
pub use coupling_command::MockCouplingCommand;
pub use coupling_command::{CouplingCommand, CreateCouplingRequest};
#[cfg(test)]
pub use coupling_query::MockCouplingQuery;
pub use coupling_query::CouplingQuery;
#[cfg(test)]
pub use coupling_repository::MockCouplingRepository;
pub use coupling_repository::{CouplingRepository, CouplingRepositoryError};
#[cfg(test)]
pub use mount_color_command::MockMountColorCommand;
pub use mount_color_command::MountColorCommand;
#[cfg(test)]
pub use mount_command::MockMountCommand;
pub use mount_command::MountCommand;
#[cfg(test)]
pub use mount_query::{MockMountColorQuery, MockMountQuery};
pub use mount_query::{MountColorQuery, MountQuery};
#[cfg(test)]
pub use mount_repository::MockMountRepository;
pub use mount_repository::{MountRepository, MountRepositoryError};
