//! Health and build identification endpoints

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash: env!("EVPLAN_GIT_HASH").to_string(),
            build_timestamp: env!("EVPLAN_BUILD_TIMESTAMP").to_string(),
            build_profile: env!("EVPLAN_BUILD_PROFILE").to_string(),
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "evplan-ai".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /build-info
pub async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/build-info", get(build_info))
}
