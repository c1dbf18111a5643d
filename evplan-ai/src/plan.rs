//! Event plan refinement
//!
//! Turns a chosen theme plus logistics into an agenda and an email
//! invitation. Single-day and multi-day events use different prompt
//! templates. On any completion failure the caller gets a Markdown
//! troubleshooting document instead of an error.

use crate::llm::CompletionClient;
use evplan_common::db::ModeratorRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{info, warn};

/// Moderator as passed into a plan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModeratorSummary {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&ModeratorRecord> for ModeratorSummary {
    fn from(record: &ModeratorRecord) -> Self {
        Self {
            name: record.name.clone(),
            city: record.city.clone().unwrap_or_default(),
            description: record.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventPlanInput {
    /// The chosen event theme
    pub selected_theme: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    /// Type of event, e.g. "Technical Conference"
    pub event_type: String,
    #[serde(default)]
    pub moderators: Vec<ModeratorSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventPlanOutput {
    /// Detailed event plan with agenda and invitation
    pub refined_plan: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTemplate {
    SingleDay,
    MultiDay,
}

impl PlanTemplate {
    /// Dates are compared as exact strings; no calendar parsing.
    pub fn select(start_date: &str, end_date: &str) -> Self {
        if start_date == end_date {
            PlanTemplate::SingleDay
        } else {
            PlanTemplate::MultiDay
        }
    }
}

pub fn moderator_sentence(moderators: &[ModeratorSummary]) -> String {
    if moderators.is_empty() {
        return "No specific moderators provided.".to_string();
    }

    let described: Vec<String> = moderators
        .iter()
        .map(|m| {
            let expertise = m.description.as_deref().unwrap_or("events");
            format!("{} from {} with expertise in {}", m.name, m.city, expertise)
        })
        .collect();

    format!("The moderators for this event are: {}.", described.join(" "))
}

pub fn build_plan_prompt(input: &EventPlanInput) -> String {
    let moderators = moderator_sentence(&input.moderators);

    match PlanTemplate::select(&input.start_date, &input.end_date) {
        PlanTemplate::SingleDay => format!(
            "Using the theme: '{theme}', provide a detailed descriptive agenda with timings \
             (from {st} to {et}), location, target audience, and purpose for the event on {sd}. \
             It is a {kind} event at {loc}. \
             {moderators} \
             Additionally, draft a professional and concise email invitation content \
             that includes the event title, \
             date, time, location, and a brief overview to invite participants.",
            theme = input.selected_theme,
            st = input.start_time,
            et = input.end_time,
            sd = input.start_date,
            kind = input.event_type,
            loc = input.location,
            moderators = moderators,
        ),
        PlanTemplate::MultiDay => format!(
            "Using the theme: '{theme}', provide a detailed descriptive agenda with timings \
             (from {st} to {et}), location, target audience, and purpose for the event \
             from {sd} to {ed}. \
             It is a {kind} event at {loc}. \
             {moderators} \
             Please make sure to split the agenda across both days ({sd} and {ed}), \
             showing a balanced distribution of sessions, breaks, and networking events \
             for both days. \
             Additionally, draft a professional and concise email invitation content \
             that includes the event title, \
             date range, daily timings, location, and a brief overview to invite participants.",
            theme = input.selected_theme,
            st = input.start_time,
            et = input.end_time,
            sd = input.start_date,
            ed = input.end_date,
            kind = input.event_type,
            loc = input.location,
            moderators = moderators,
        ),
    }
}

/// Markdown document returned in place of a plan
pub fn fallback_plan(
    input: &EventPlanInput,
    error: &impl Display,
    base_url: &str,
    model_name: &str,
) -> String {
    format!(
        "# Event Planning Error\n\
         \n\
         **Theme**: {theme}\n\
         **Location**: {loc}\n\
         **Date**: {sd} to {ed}\n\
         **Time**: {st} - {et}\n\
         \n\
         ## Error Details\n\
         Unable to generate event plan due to: {error}\n\
         \n\
         ## Troubleshooting\n\
         1. Verify NIM_BASE_URL is set correctly: {base_url}\n\
         2. Check NVIDIA_API_KEY is valid\n\
         3. Ensure the completion endpoint is running and accessible\n\
         4. Check network connectivity\n\
         5. Verify model name: {model_name}\n\
         \n\
         Please check your configuration and try again.\n",
        theme = input.selected_theme,
        loc = input.location,
        sd = input.start_date,
        ed = input.end_date,
        st = input.start_time,
        et = input.end_time,
        error = error,
        base_url = base_url,
        model_name = model_name,
    )
}

/// Refine a theme into a plan, degrading to [`fallback_plan`]
pub async fn refine_event_plan(
    client: &CompletionClient,
    input: &EventPlanInput,
) -> EventPlanOutput {
    let template = PlanTemplate::select(&input.start_date, &input.end_date);
    let prompt = build_plan_prompt(input);

    match client.complete(&prompt).await {
        Ok(refined_plan) => {
            info!(?template, plan_chars = refined_plan.len(), "Refined event plan");
            EventPlanOutput { refined_plan }
        }
        Err(e) => {
            warn!(
                error = %e,
                ?template,
                "Plan refinement failed, returning troubleshooting document"
            );
            EventPlanOutput {
                refined_plan: fallback_plan(input, &e, client.base_url(), client.model()),
            }
        }
    }
}
