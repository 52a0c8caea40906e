//! Mount manager backend: mounts, couplings and account settings for a
//! breeding game, exposed over HTTP.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the model, rules
//! and services; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] provides PostgreSQL and in-memory storage adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
