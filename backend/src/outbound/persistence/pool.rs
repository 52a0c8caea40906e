//! bb8 pool of async Diesel PostgreSQL connections.
//!
//! Checkout respects the configured timeout, which is the only store timeout
//! the service applies.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Failures building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be checked out in time.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Underlying failure.
        message: String,
    },
    /// The pool could not be created.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Underlying failure.
        message: String,
    },
}

impl PoolError {
    /// [`PoolError::Checkout`] from any message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// [`PoolError::Build`] from any message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and timeouts.
///
/// Defaults: ten connections, two kept idle, thirty second checkout timeout.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use mount_manager::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/mounts")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Defaults for `database_url`.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Upper bound on open connections.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Connections kept open while idle.
    #[must_use]
    pub const fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a checkout may wait.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Upper bound on open connections.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening `min_idle` connections eagerly.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection, waiting at most the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
