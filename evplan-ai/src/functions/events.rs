//! Generation callables backed by the completion endpoint

use super::{EventFunction, RegistryError};
use crate::llm::CompletionClient;
use crate::plan::{self, EventPlanInput, EventPlanOutput};
use crate::themes::{self, EventIdeaInput, ThemesOutput};

pub struct GenerateEventThemes {
    client: CompletionClient,
}

impl GenerateEventThemes {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }
}

impl EventFunction for GenerateEventThemes {
    type Args = EventIdeaInput;
    type Output = ThemesOutput;

    fn name(&self) -> &'static str {
        "generate_event_themes"
    }

    fn description(&self) -> &'static str {
        "Generate five creative and professional event themes based on an event idea"
    }

    async fn call(&self, args: EventIdeaInput) -> Result<ThemesOutput, RegistryError> {
        Ok(themes::generate_event_themes(&self.client, &args.event_idea).await)
    }
}

pub struct RefineEventPlan {
    client: CompletionClient,
}

impl RefineEventPlan {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }
}

impl EventFunction for RefineEventPlan {
    type Args = EventPlanInput;
    type Output = EventPlanOutput;

    fn name(&self) -> &'static str {
        "refine_event_plan"
    }

    fn description(&self) -> &'static str {
        "Transform a selected event theme into a detailed event plan \
         with agenda, timings, and invitation"
    }

    async fn call(&self, args: EventPlanInput) -> Result<EventPlanOutput, RegistryError> {
        Ok(plan::refine_event_plan(&self.client, &args).await)
    }
}
