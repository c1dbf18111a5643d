//! Record store initialization
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so running initialization
//! again after a partial failure converges to the full schema and never
//! touches existing rows. Destroying data requires [`recreate_database`].

use super::{close_quietly, connect_options};
use crate::Result;
use sqlx::{ConnectOptions, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of [`init_database`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    /// The database file did not exist before this call
    pub newly_created: bool,
}

/// Create the database file (and parent directory) if needed and ensure both
/// tables and their lookup indexes exist
pub async fn init_database(db_path: &Path) -> Result<InitOutcome> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut conn = connect_options(db_path)
        .create_if_missing(true)
        .connect()
        .await?;

    let result = create_schema(&mut conn).await;
    close_quietly(conn).await;
    result?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Verified schema of existing database: {}", db_path.display());
    }

    Ok(InitOutcome { newly_created })
}

/// Delete the database file (with its SQLite side files) and initialize a
/// fresh, empty schema in its place
pub async fn recreate_database(db_path: &Path) -> Result<InitOutcome> {
    for path in database_files(db_path) {
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
    }
    info!("Deleted existing database: {}", db_path.display());

    init_database(db_path).await
}

fn database_files(db_path: &Path) -> Vec<PathBuf> {
    let mut files = vec![db_path.to_path_buf()];
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut name = db_path.as_os_str().to_owned();
        name.push(suffix);
        files.push(PathBuf::from(name));
    }
    files
}

async fn create_schema(conn: &mut SqliteConnection) -> Result<()> {
    create_moderators_table(conn).await?;
    create_participants_table(conn).await?;
    create_indexes(conn).await?;
    Ok(())
}

async fn create_moderators_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS moderators (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT,
            description TEXT,
            email TEXT,
            phone TEXT,
            expertise TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_participants_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            company TEXT,
            role TEXT,
            phone TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_indexes(conn: &mut SqliteConnection) -> Result<()> {
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_moderators_name ON moderators(name)",
        "CREATE INDEX IF NOT EXISTS idx_moderators_expertise ON moderators(expertise)",
        "CREATE INDEX IF NOT EXISTS idx_participants_name ON participants(name)",
        "CREATE INDEX IF NOT EXISTS idx_participants_email ON participants(email)",
    ] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    Ok(())
}
