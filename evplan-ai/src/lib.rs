//! evplan-ai library - event planning functions
//!
//! Theme generation and plan refinement against an external completion
//! endpoint, plus moderator/participant lookups, exposed as named callables
//! through [`functions::FunctionRegistry`] and over HTTP.

use axum::Router;
use evplan_common::{DatabaseManager, Settings};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;
pub mod functions;
pub mod llm;
pub mod plan;
pub mod themes;
pub mod workflow;

use functions::FunctionRegistry;
use llm::{CompletionClient, CompletionError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FunctionRegistry>,
}

impl AppState {
    pub fn new(registry: FunctionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// State with the event-planning functions wired to `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, CompletionError> {
        let client = CompletionClient::new(&settings.llm)?;
        let db = DatabaseManager::new(settings.db_path.clone());
        Ok(Self::new(FunctionRegistry::with_event_functions(client, db)))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::function_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
