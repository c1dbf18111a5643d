//! Record store: schema, models and queries

pub mod init;
pub mod manager;
pub mod models;
pub mod seed;

pub use init::*;
pub use manager::DatabaseManager;
pub use models::*;
pub use seed::*;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Base connection options shared by initialization and per-call access.
/// Does not create a missing file; callers opt in with `create_if_missing`.
pub(crate) fn connect_options(db_path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(db_path)
        .busy_timeout(Duration::from_millis(5000))
}

/// Close a per-call connection, logging rather than failing on error
pub(crate) async fn close_quietly(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection cleanly: {}", e);
    }
}
