//! Synchronous end-to-end planning run
//!
//! Drives the same theme and plan functions the registry exposes, but from
//! blocking code: the workflow owns a small tokio runtime and blocks on each
//! step, so it must not be driven from inside another runtime.

use crate::llm::CompletionClient;
use crate::plan::{self, EventPlanInput, ModeratorSummary};
use crate::themes;
use evplan_common::db::{ModeratorRecord, ParticipantRecord};
use evplan_common::{DatabaseManager, Settings};
use std::fmt::Write as _;
use tracing::{info, warn};

const BANNER_WIDTH: usize = 60;

/// Logistics for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub event_type: String,
}

/// Everything one [`EventPlanningWorkflow::run`] produced
#[derive(Debug, Clone)]
pub struct PlanningRun {
    pub themes: Vec<String>,
    pub moderators: Vec<ModeratorRecord>,
    pub participants: Vec<ParticipantRecord>,
    /// `None` when there was no theme or no moderator to plan with
    pub plan: Option<String>,
}

pub struct EventPlanningWorkflow {
    runtime: tokio::runtime::Runtime,
    client: CompletionClient,
    db: DatabaseManager,
}

impl EventPlanningWorkflow {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            client: CompletionClient::new(&settings.llm)?,
            db: DatabaseManager::new(settings.db_path.clone()),
        })
    }

    pub fn generate_event_themes(&self, event_idea: &str) -> Vec<String> {
        self.runtime
            .block_on(themes::generate_event_themes(&self.client, event_idea))
            .themes
    }

    pub fn fetch_moderators(&self) -> Vec<ModeratorRecord> {
        self.runtime.block_on(self.db.list_moderators(None))
    }

    pub fn fetch_participants(&self, limit: Option<u32>) -> Vec<ParticipantRecord> {
        self.runtime.block_on(self.db.list_participants(None, limit))
    }

    /// Refine `selected_theme` into a plan (or the troubleshooting document)
    pub fn start_event_planning(
        &self,
        selected_theme: &str,
        details: &EventDetails,
        moderators: &[ModeratorSummary],
    ) -> String {
        let input = EventPlanInput {
            selected_theme: selected_theme.to_string(),
            start_date: details.start_date.clone(),
            end_date: details.end_date.clone(),
            start_time: details.start_time.clone(),
            end_time: details.end_time.clone(),
            location: details.location.clone(),
            event_type: details.event_type.clone(),
            moderators: moderators.to_vec(),
        };

        self.runtime
            .block_on(plan::refine_event_plan(&self.client, &input))
            .refined_plan
    }

    /// Themes, then moderators, then participants, then a plan for the
    /// first theme with at most `max_moderators` moderators.
    pub fn run(
        &self,
        event_idea: &str,
        details: &EventDetails,
        max_moderators: usize,
        participant_limit: Option<u32>,
    ) -> PlanningRun {
        let themes = self.generate_event_themes(event_idea);
        info!("Generated {} themes", themes.len());

        let moderators = self.fetch_moderators();
        info!("Found {} moderators in database", moderators.len());

        let participants = self.fetch_participants(participant_limit);
        info!("Found {} participants in database", participants.len());

        let plan = match themes.first() {
            Some(theme) if !moderators.is_empty() => {
                let chosen: Vec<ModeratorSummary> = moderators
                    .iter()
                    .take(max_moderators)
                    .map(ModeratorSummary::from)
                    .collect();
                Some(self.start_event_planning(theme, details, &chosen))
            }
            _ => {
                warn!("No themes or moderators found, skipping plan refinement");
                None
            }
        };

        PlanningRun {
            themes,
            moderators,
            participants,
            plan,
        }
    }
}

/// Banner-framed plan followed by the participant roster (when any)
pub fn format_plan_report(plan: &str, participants: &[ParticipantRecord]) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}\nREFINED EVENT PLAN\n{}", rule, rule);
    let _ = writeln!(out, "{}", plan);
    let _ = writeln!(out, "{}\n", rule);

    if !participants.is_empty() {
        let _ = writeln!(out, "{}\nEVENT PARTICIPANTS\n{}", rule, rule);
        for p in participants {
            let _ = writeln!(out, "- {} ({})", p.name, p.email);
        }
        let _ = writeln!(out, "{}\n", rule);
    }

    out
}
