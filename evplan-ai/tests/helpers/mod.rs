//! Test Helper Utilities
//!
//! Shared utilities for testing evplan-ai

#![allow(dead_code)]

pub mod stub_llm;

pub use stub_llm::{completion_body, CapturedRequest, StubLlm};

use evplan_common::config::{LlmSettings, ServerSettings};
use evplan_common::db::{init_database, seed_sample_data};
use evplan_common::{DatabaseManager, Settings};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Nothing listens here; connections are refused immediately
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

pub fn test_settings(base_url: &str, db_path: &Path) -> Settings {
    Settings {
        llm: LlmSettings {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            model_name: "test/model".to_string(),
            timeout: Duration::from_secs(5),
        },
        db_path: db_path.to_path_buf(),
        server: ServerSettings {
            bind: "127.0.0.1:0".to_string(),
        },
        log_level: "debug".to_string(),
    }
}

/// Initialized store with the sample rows, in a temp directory
pub async fn seeded_db() -> (TempDir, DatabaseManager) {
    let (dir, db) = empty_db().await;
    seed_sample_data(&db).await.expect("seed sample data");
    (dir, db)
}

/// Initialized store with no rows
pub async fn empty_db() -> (TempDir, DatabaseManager) {
    let dir = TempDir::new().expect("temp dir");
    let db_path: PathBuf = dir.path().join("event_planning.db");
    init_database(&db_path).await.expect("init database");
    (dir, DatabaseManager::new(db_path))
}
