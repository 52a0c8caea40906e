//! Shared classification of pool and Diesel failures.
//!
//! Each repository converts a [`StoreFailure`] into its own port error so the
//! domain never sees Diesel types. Connection-level problems stay distinct
//! from query failures because the domain maps them to different codes.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure classified for port error mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(String),
    Query(String),
    UniqueViolation(String),
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            other => debug!(error = %other, "diesel operation failed"),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.constraint_name().unwrap_or("unique").to_owned())
            }
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            DieselError::DeserializationError(_) => {
                Self::Query("failed to decode database row".to_owned())
            }
            _ => Self::Query("database error".to_owned()),
        }
    }
}

impl StoreFailure {
    /// Map onto a port error that only distinguishes connection from query.
    pub(crate) fn into_port_error<E>(
        self,
        connection: impl FnOnce(String) -> E,
        query: impl FnOnce(String) -> E,
    ) -> E {
        match self {
            Self::Connection(message) => connection(message),
            Self::Query(message) => query(message),
            Self::UniqueViolation(constraint) => {
                query(format!("unique constraint {constraint} violated"))
            }
        }
    }
}
