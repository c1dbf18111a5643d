//! Per-call data access for moderators and participants
//!
//! Each operation opens its own connection, runs in one implicit
//! transaction and releases the connection on every exit path. Reads return
//! rows in storage (id) order; the name indexes must not reorder results.
//!
//! Filter semantics: an empty name list is
//! treated exactly like "no filter", and a participant `limit` only applies
//! when no names are given (a limit of 0 means "no limit").

use super::models::{
    ModeratorRecord, NewModerator, NewParticipant, ParticipantRecord, StoredModerator,
    StoredParticipant,
};
use super::{close_quietly, connect_options};
use crate::{Error, Result};
use sqlx::{ConnectOptions, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const MODERATOR_COLUMNS: &str = "name, city, description, email, phone, expertise";
const PARTICIPANT_COLUMNS: &str = "name, email, company, role, phone";

/// Data access handle. Holds only the database path; no connection is kept
/// open between calls.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    db_path: PathBuf,
}

impl DatabaseManager {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection. A missing database file is an error.
    pub(crate) async fn connect(&self) -> Result<SqliteConnection> {
        debug!("Opening database connection: {}", self.db_path.display());
        Ok(connect_options(&self.db_path).connect().await?)
    }

    /// Moderators in storage order, optionally filtered by name.
    ///
    /// Store errors are logged and degrade to an empty list.
    pub async fn list_moderators(&self, names: Option<&[String]>) -> Vec<ModeratorRecord> {
        match self.try_list_moderators(names).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Database error fetching moderators: {}", e);
                Vec::new()
            }
        }
    }

    /// Participants in storage order, filtered by name or capped by `limit`.
    ///
    /// Store errors are logged and degrade to an empty list.
    pub async fn list_participants(
        &self,
        names: Option<&[String]>,
        limit: Option<u32>,
    ) -> Vec<ParticipantRecord> {
        match self.try_list_participants(names, limit).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Database error fetching participants: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_list_moderators(
        &self,
        names: Option<&[String]>,
    ) -> Result<Vec<ModeratorRecord>> {
        let mut conn = self.connect().await?;

        let rows = match active_filter(names) {
            Some(names) => {
                let sql = format!(
                    "SELECT {} FROM moderators WHERE name IN ({}) ORDER BY id",
                    MODERATOR_COLUMNS,
                    placeholders(names.len())
                );
                let mut query = sqlx::query_as::<_, ModeratorRecord>(&sql);
                for name in names {
                    query = query.bind(name.as_str());
                }
                query.fetch_all(&mut conn).await
            }
            None => {
                let sql = format!("SELECT {} FROM moderators ORDER BY id", MODERATOR_COLUMNS);
                sqlx::query_as::<_, ModeratorRecord>(&sql)
                    .fetch_all(&mut conn)
                    .await
            }
        };

        close_quietly(conn).await;
        Ok(rows?)
    }

    pub async fn try_list_participants(
        &self,
        names: Option<&[String]>,
        limit: Option<u32>,
    ) -> Result<Vec<ParticipantRecord>> {
        let mut conn = self.connect().await?;

        let rows = match active_filter(names) {
            // names take precedence; limit is ignored
            Some(names) => {
                let sql = format!(
                    "SELECT {} FROM participants WHERE name IN ({}) ORDER BY id",
                    PARTICIPANT_COLUMNS,
                    placeholders(names.len())
                );
                let mut query = sqlx::query_as::<_, ParticipantRecord>(&sql);
                for name in names {
                    query = query.bind(name.as_str());
                }
                query.fetch_all(&mut conn).await
            }
            None => match limit.filter(|l| *l > 0) {
                Some(limit) => {
                    let sql = format!(
                        "SELECT {} FROM participants ORDER BY id LIMIT ?",
                        PARTICIPANT_COLUMNS
                    );
                    sqlx::query_as::<_, ParticipantRecord>(&sql)
                        .bind(i64::from(limit))
                        .fetch_all(&mut conn)
                        .await
                }
                None => {
                    let sql =
                        format!("SELECT {} FROM participants ORDER BY id", PARTICIPANT_COLUMNS);
                    sqlx::query_as::<_, ParticipantRecord>(&sql)
                        .fetch_all(&mut conn)
                        .await
                }
            },
        };

        close_quietly(conn).await;
        Ok(rows?)
    }

    /// Insert a moderator and return its row id. Failures are logged before
    /// they are returned.
    pub async fn add_moderator(&self, moderator: &NewModerator) -> Result<i64> {
        match self.insert_moderator(moderator).await {
            Ok(id) => {
                info!("Added moderator: {} (id {})", moderator.name, id);
                Ok(id)
            }
            Err(e) => {
                error!("Database error adding moderator {}: {}", moderator.name, e);
                Err(e)
            }
        }
    }

    async fn insert_moderator(&self, moderator: &NewModerator) -> Result<i64> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO moderators (name, city, description, email, phone, expertise)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(moderator.name.as_str())
        .bind(moderator.city.as_deref())
        .bind(moderator.description.as_deref())
        .bind(moderator.email.as_deref())
        .bind(moderator.phone.as_deref())
        .bind(moderator.expertise.as_deref())
        .execute(&mut conn)
        .await;

        close_quietly(conn).await;
        Ok(result?.last_insert_rowid())
    }

    /// Insert a participant and return its row id.
    ///
    /// A duplicate email fails with [`Error::DuplicateKey`] and writes nothing.
    pub async fn add_participant(&self, participant: &NewParticipant) -> Result<i64> {
        match self.insert_participant(participant).await {
            Ok(id) => {
                info!("Added participant: {} (id {})", participant.name, id);
                Ok(id)
            }
            Err(e @ Error::DuplicateKey(_)) => {
                warn!("Rejected participant {}: {}", participant.name, e);
                Err(e)
            }
            Err(e) => {
                error!("Database error adding participant {}: {}", participant.name, e);
                Err(e)
            }
        }
    }

    async fn insert_participant(&self, participant: &NewParticipant) -> Result<i64> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO participants (name, email, company, role, phone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(participant.name.as_str())
        .bind(participant.email.as_str())
        .bind(participant.company.as_deref())
        .bind(participant.role.as_deref())
        .bind(participant.phone.as_deref())
        .execute(&mut conn)
        .await;

        close_quietly(conn).await;
        let done = result.map_err(|e| {
            let duplicate = format!("participant with email {} already exists", participant.email);
            Error::from_insert(e, duplicate)
        })?;
        Ok(done.last_insert_rowid())
    }

    /// Every moderator row including id and creation time
    pub async fn all_moderators(&self) -> Result<Vec<StoredModerator>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, StoredModerator>(
            r#"
            SELECT id, name, city, description, email, phone, expertise, created_at
            FROM moderators
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await;
        close_quietly(conn).await;
        Ok(rows?)
    }

    /// Every participant row including id and creation time
    pub async fn all_participants(&self) -> Result<Vec<StoredParticipant>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, StoredParticipant>(
            r#"
            SELECT id, name, email, company, role, phone, created_at
            FROM participants
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await;
        close_quietly(conn).await;
        Ok(rows?)
    }
}

/// `Some([])` collapses to `None`: an empty list means "no filter"
fn active_filter(names: Option<&[String]>) -> Option<&[String]> {
    names.filter(|n| !n.is_empty())
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
