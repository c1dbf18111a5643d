//! Record store models

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Moderator as returned by reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct ModeratorRecord {
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-text tags, e.g. "Technical, AI/ML, Cloud Computing"
    pub expertise: Option<String>,
}

/// Participant as returned by reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct ParticipantRecord {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
}

/// Insert payload for a moderator. No uniqueness is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModerator {
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub expertise: Option<String>,
}

/// Insert payload for a participant. `email` must be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
}

/// Full moderator row, used by the maintenance dump
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StoredModerator {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Full participant row, used by the maintenance dump
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StoredParticipant {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<NewModerator> for ModeratorRecord {
    fn from(m: NewModerator) -> Self {
        Self {
            name: m.name,
            city: m.city,
            description: m.description,
            email: m.email,
            phone: m.phone,
            expertise: m.expertise,
        }
    }
}

impl From<NewParticipant> for ParticipantRecord {
    fn from(p: NewParticipant) -> Self {
        Self {
            name: p.name,
            email: p.email,
            company: p.company,
            role: p.role,
            phone: p.phone,
        }
    }
}
