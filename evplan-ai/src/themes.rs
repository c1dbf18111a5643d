//! Event theme generation
//!
//! Asks the completion endpoint for five numbered, bold-titled ideas and
//! splits the reply into one string per theme. Failures never reach the
//! caller: they become five fixed diagnostic strings instead.

use crate::llm::{CompletionClient, CompletionError};
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{info, warn};

/// Leading `**<n>. ` of each numbered heading. The closing `**` stays with
/// the title text.
static THEME_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\d+\.\s*").expect("theme heading pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventIdeaInput {
    /// The base idea or concept for the event
    pub event_idea: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThemesOutput {
    /// Generated event themes, or diagnostic strings when generation failed
    pub themes: Vec<String>,
}

pub fn build_theme_prompt(event_idea: &str) -> String {
    format!(
        "Generate exactly five professional, creative, and distinct event ideas \
         with titles and detailed descriptions based on: '{}'. \
         Format each theme as a numbered bold title followed by its description",
        event_idea
    )
}

/// Split a completion reply into theme segments
pub fn parse_themes(response: &str) -> Vec<String> {
    let mut segments: Vec<&str> = THEME_HEADING.split(response.trim()).collect();

    // text before the first heading
    if segments.first().is_some_and(|s| s.trim().is_empty()) {
        segments.remove(0);
    }

    segments
        .into_iter()
        .map(|segment| segment.replace("\n\n", "\n").trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// The five diagnostic strings returned in place of themes
pub fn fallback_themes(error: &impl Display) -> Vec<String> {
    vec![
        "**Event Theme 1**: Unable to generate themes. Please check your LLM configuration."
            .to_string(),
        format!("**Event Theme 2**: Error: {}", error),
        "**Event Theme 3**: Verify NIM_BASE_URL and NVIDIA_API_KEY are set correctly.".to_string(),
        "**Event Theme 4**: Ensure your completion endpoint is running.".to_string(),
        "**Event Theme 5**: Check network connectivity to the completion server.".to_string(),
    ]
}

/// Generate themes for `event_idea`, degrading to [`fallback_themes`]
pub async fn generate_event_themes(client: &CompletionClient, event_idea: &str) -> ThemesOutput {
    match request_themes(client, event_idea).await {
        Ok(themes) => {
            info!(count = themes.len(), "Generated event themes");
            ThemesOutput { themes }
        }
        Err(e) => {
            warn!(error = %e, "Theme generation failed, returning diagnostic themes");
            ThemesOutput {
                themes: fallback_themes(&e),
            }
        }
    }
}

async fn request_themes(
    client: &CompletionClient,
    event_idea: &str,
) -> Result<Vec<String>, CompletionError> {
    let content = client.complete(&build_theme_prompt(event_idea)).await?;
    let themes = parse_themes(&content);
    if themes.is_empty() {
        return Err(CompletionError::NoThemes);
    }
    Ok(themes)
}
