//! Embedded schema migrations.
//!
//! `diesel_migrations` drives a synchronous connection, so the async
//! connection is wrapped and the run happens on the blocking pool.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("could not connect to run migrations: {message}")]
    Connect { message: String },
    #[error("migration failed: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Task { message: String },
}

/// Apply every pending migration to the database at `database_url`.
///
/// # Errors
/// [`MigrationError`] when the database is unreachable or a migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url).map_err(
            |e| MigrationError::Connect {
                message: e.to_string(),
            },
        )?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| MigrationError::Apply {
                message: e.to_string(),
            })?;
        info!(applied = applied.len(), "database migrations applied");
        Ok(())
    })
    .await
    .map_err(|e| MigrationError::Task {
        message: e.to_string(),
    })?
}
