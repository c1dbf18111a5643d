//! Record store callables

use super::{EventFunction, RegistryError};
use evplan_common::db::{ModeratorRecord, ParticipantRecord};
use evplan_common::DatabaseManager;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ModeratorsInput {
    /// Names to look up. Absent or empty returns every moderator.
    #[serde(default)]
    pub moderator_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModeratorsOutput {
    pub moderators: Vec<ModeratorRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ParticipantsInput {
    /// Names to look up. When non-empty, `limit` is ignored.
    #[serde(default)]
    pub participant_names: Option<Vec<String>>,
    /// Maximum rows when no names are given; 0 means no limit
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParticipantsOutput {
    pub participants: Vec<ParticipantRecord>,
}

pub struct FetchModerators {
    db: DatabaseManager,
}

impl FetchModerators {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

impl EventFunction for FetchModerators {
    type Args = ModeratorsInput;
    type Output = ModeratorsOutput;

    fn name(&self) -> &'static str {
        "fetch_moderators"
    }

    fn description(&self) -> &'static str {
        "Fetch moderator details from the database by name or get all moderators"
    }

    async fn call(&self, args: ModeratorsInput) -> Result<ModeratorsOutput, RegistryError> {
        let moderators = self
            .db
            .list_moderators(args.moderator_names.as_deref())
            .await;
        Ok(ModeratorsOutput { moderators })
    }
}

pub struct FetchParticipants {
    db: DatabaseManager,
}

impl FetchParticipants {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

impl EventFunction for FetchParticipants {
    type Args = ParticipantsInput;
    type Output = ParticipantsOutput;

    fn name(&self) -> &'static str {
        "fetch_participants"
    }

    fn description(&self) -> &'static str {
        "Fetch participant details from the database by name or get all participants"
    }

    async fn call(&self, args: ParticipantsInput) -> Result<ParticipantsOutput, RegistryError> {
        let participants = self
            .db
            .list_participants(args.participant_names.as_deref(), args.limit)
            .await;
        Ok(ParticipantsOutput { participants })
    }
}
