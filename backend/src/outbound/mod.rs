//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: process-local store used when no database is configured
//!   and by integration tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
