//! Maintenance operations behind the evplan-db subcommands

use crate::report::{format_moderators, format_participants};
use evplan_common::db::{
    init_database, recreate_database, seed_sample_data, NewModerator, NewParticipant, SeedSummary,
};
use evplan_common::{DatabaseManager, Result};
use std::path::Path;
use tracing::info;

/// What an `init` run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub newly_created: bool,
    pub recreated: bool,
    pub seeded: Option<SeedSummary>,
}

/// Create the tables (dropping the file first when `recreate`), then
/// optionally seed the sample rows.
pub async fn init(db_path: &Path, recreate: bool, seed: bool) -> Result<InitReport> {
    let outcome = if recreate {
        info!("Recreating database at {}", db_path.display());
        recreate_database(db_path).await?
    } else {
        init_database(db_path).await?
    };

    let seeded = if seed {
        Some(seed_sample_data(&DatabaseManager::new(db_path)).await?)
    } else {
        None
    };

    Ok(InitReport {
        newly_created: outcome.newly_created,
        recreated: recreate,
        seeded,
    })
}

pub async fn seed(db_path: &Path) -> Result<SeedSummary> {
    seed_sample_data(&DatabaseManager::new(db_path)).await
}

/// Both tables rendered as text
pub async fn dump(db_path: &Path) -> Result<String> {
    let db = DatabaseManager::new(db_path);
    let moderators = db.all_moderators().await?;
    let participants = db.all_participants().await?;

    Ok(format!(
        "{}{}",
        format_moderators(&moderators),
        format_participants(&participants)
    ))
}

pub async fn add_moderator(db_path: &Path, moderator: &NewModerator) -> Result<i64> {
    DatabaseManager::new(db_path).add_moderator(moderator).await
}

pub async fn add_participant(db_path: &Path, participant: &NewParticipant) -> Result<i64> {
    DatabaseManager::new(db_path).add_participant(participant).await
}
