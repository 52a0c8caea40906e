//! Embedded schema migrations, applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::PoolError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations on a dedicated blocking connection.
///
/// # Errors
/// Returns [`PoolError::Build`] when the database cannot be reached or a
/// migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), PoolError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| PoolError::build(format!("connect for migrations: {err}")))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| PoolError::build(format!("migration failed: {err}")))?;
        info!(count = applied.len(), "database migrations applied");
        Ok(())
    })
    .await
    .map_err(|err| PoolError::build(format!("migration task aborted: {err}")))?
}
