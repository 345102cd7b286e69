//! SQLite connection pools for the Lingo database.
//!
//! The database file is `{data_dir}/lingo.db`. SQLite serializes writers, so
//! writes go through a one-connection pool while reads share a larger
//! read-only pool. Both run in WAL mode with foreign keys enforced; the
//! schema relies on them to cascade sessions and messages with their user.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "lingo.db";

/// Concurrent readers serving history and session lookups.
const READER_CONNECTIONS: u32 = 8;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader and writer pools over the same database file.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open (creating if needed) `{data_dir}/lingo.db` and apply migrations.
    pub async fn open(data_dir: &Path) -> Result<Self, sqlx::Error> {
        tokio::fs::create_dir_all(data_dir).await?;
        Self::open_file(database_path(data_dir)).await
    }

    async fn open_file(path: PathBuf) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        // The writer must exist and be migrated before a read-only
        // connection can open the file.
        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        tracing::debug!(path = %path.display(), "Database opened");
        Ok(Self { reader, writer })
    }
}

/// Location of the database file for a data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}
