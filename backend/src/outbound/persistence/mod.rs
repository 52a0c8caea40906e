//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use mount_manager::outbound::persistence::{DbPool, DieselMountRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/mounts")).await?;
//! let mounts = DieselMountRepository::new(pool);
//! ```

mod diesel_account_settings_repository;
mod diesel_catalogue_repository;
mod diesel_coupling_repository;
mod diesel_error_mapping;
mod diesel_mount_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_settings_repository::DieselAccountSettingsRepository;
pub use diesel_catalogue_repository::{DieselMountColorRepository, DieselServerDirectory};
pub use diesel_coupling_repository::DieselCouplingRepository;
pub use diesel_mount_repository::DieselMountRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
