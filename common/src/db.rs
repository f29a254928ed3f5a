//! Connection handling for the persistence layer.
//!
//! The service talks to either PostgreSQL or SQLite depending on the
//! configured URL. [`AnyConnection`] picks the backend when a connection is
//! established, so query code is written once against it.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::{PgConnection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};

use crate::settings::DatabaseSettings;

pub const POSTGRES_MIGRATIONS: EmbeddedMigrations =
    diesel_migrations::embed_migrations!("migrations/postgres");
pub const SQLITE_MIGRATIONS: EmbeddedMigrations =
    diesel_migrations::embed_migrations!("migrations/sqlite");

const SQLITE_BUSY_TIMEOUT_MS: u32 = 5_000;

// Establishing tries each variant in order. Postgres rejects plain file paths
// immediately, so SQLite URLs fall through to the second variant.
#[derive(diesel::MultiConnection)]
pub enum AnyConnection {
    Postgresql(PgConnection),
    Sqlite(SqliteConnection),
}

pub type DbPool = Pool<ConnectionManager<AnyConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<AnyConnection>>;

pub type MigrationError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<AnyConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut AnyConnection) -> Result<(), diesel::r2d2::Error> {
        if let AnyConnection::Sqlite(con) = conn {
            con.batch_execute(&format!(
                "PRAGMA busy_timeout = {};",
                SQLITE_BUSY_TIMEOUT_MS
            ))
            .map_err(diesel::r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

pub fn connection_pool(settings: &DatabaseSettings) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<AnyConnection>::new(settings.connection_url());

    Pool::builder()
        .max_size(settings.max_connections)
        .connection_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
}

/// Applies every pending migration for the backend behind `conn`.
#[tracing::instrument(name = "Running database migrations", skip(conn))]
pub fn run_migrations(conn: &mut AnyConnection) -> Result<(), MigrationError> {
    let applied = match conn {
        AnyConnection::Postgresql(con) => con.run_pending_migrations(POSTGRES_MIGRATIONS)?.len(),
        AnyConnection::Sqlite(con) => con.run_pending_migrations(SQLITE_MIGRATIONS)?.len(),
    };

    tracing::info!(applied, "Database migrations complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_path_builds_a_migrated_pool() {
        let dir = tempfile::tempdir().expect("Unable to create temp dir");
        let settings = DatabaseSettings {
            url: format!("sqlite:///{}", dir.path().join("pool.db").display()),
            max_connections: 2,
            acquire_timeout_secs: 2,
        };

        let pool = connection_pool(&settings).expect("Unable to build database pool");
        let mut con = pool.get().expect("Unable to get database connection");

        assert!(matches!(*con, AnyConnection::Sqlite(_)));
        run_migrations(&mut con).expect("Unable to run database migrations");
        // Second run finds nothing pending.
        run_migrations(&mut con).expect("Unable to re-run database migrations");
    }
}
