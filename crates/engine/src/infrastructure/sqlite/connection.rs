use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::infrastructure::ports::RepoError;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS superpowers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS heroes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        real_name TEXT NOT NULL,
        hero_name TEXT NOT NULL UNIQUE,
        date_of_birth TEXT NOT NULL,
        height REAL NOT NULL,
        weight REAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS heroes_superpowers (
        hero_id INTEGER NOT NULL REFERENCES heroes (id),
        superpower_id INTEGER NOT NULL REFERENCES superpowers (id),
        PRIMARY KEY (hero_id, superpower_id)
    )
    "#,
];

/// Open a pool for `database_url` (e.g. `sqlite://heroes.db`), creating the
/// database file when missing. Foreign keys are enforced on every connection,
/// and writers wait up to [`BUSY_TIMEOUT`] for the lock.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RepoError::database("open_pool", e))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("open_pool", e))
}

/// Create the catalog tables if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    tracing::debug!("Catalog schema ready");
    Ok(())
}
