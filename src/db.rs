//! Database connection helpers.
//!
//! Wraps the Diesel r2d2 pool for the SQLite database holding companies and
//! employees, and applies the embedded schema migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_query;
use diesel::sql_types::Integer;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{error, info};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite settings applied to every pooled connection.
///
/// Foreign keys are not optional: employees reference their company and are
/// removed with it through `ON DELETE CASCADE`, which SQLite only honours
/// when enforcement is on for the connection doing the delete.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    /// Use write-ahead logging.
    pub wal: bool,
    /// How long a writer waits for a locked database.
    pub busy_timeout: Duration,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            wal: true,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

impl SqlitePragmas {
    fn batch(&self) -> String {
        let mut batch = format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        );
        if self.wal {
            batch.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        batch
    }
}

#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.batch())
            .map_err(diesel::r2d2::Error::QueryError)?;

        // The pragma is a silent no-op inside a transaction or on builds
        // without foreign key support.
        let enforced = sql_query("PRAGMA foreign_keys")
            .get_result::<ForeignKeys>(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        if enforced.foreign_keys != 1 {
            error!("SQLite connection refused to enable foreign keys");
            return Err(diesel::r2d2::Error::QueryError(
                diesel::result::Error::QueryBuilderError(
                    "foreign key enforcement is unavailable".into(),
                ),
            ));
        }
        Ok(())
    }
}

/// Create a pool for the SQLite database at `database_url`.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_connection_pool_with(database_url, SqlitePragmas::default())
}

pub fn establish_connection_pool_with(
    database_url: &str,
    pragmas: SqlitePragmas,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(pragmas))
        .build(manager)
}

/// Check a connection out of the pool, logging why when none is available.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|e| error!("No database connection available: {e}"))
}

/// Apply every migration that has not been run against the pooled database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut pooled = get_connection(pool)?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        info!("Applied {} pending migration(s)", applied.len());
    }
    Ok(())
}
