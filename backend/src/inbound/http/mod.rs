//! HTTP inbound adapter exposing REST endpoints.

pub mod account_settings;
pub mod couplings;
pub mod error;
pub mod health;
pub mod mount_colors;
pub mod mounts;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
