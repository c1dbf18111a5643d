//! # evplan Common Library
//!
//! Shared code for the event planning binaries:
//! - Record store schema, models and queries
//! - Settings resolution (CLI → ENV → TOML → defaults)
//! - Common error type
//! - Tracing subscriber setup

pub mod config;
pub mod db;
pub mod error;
pub mod logging;

pub use config::Settings;
pub use db::DatabaseManager;
pub use error::{Error, Result};
