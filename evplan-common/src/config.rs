//! Settings resolution for the event planning binaries
//!
//! Every field resolves independently in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Settings are resolved once at process start and passed by reference into
//! each component. Nothing here is global.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const ENV_BASE_URL: &str = "NIM_BASE_URL";
pub const ENV_API_KEY: &str = "NVIDIA_API_KEY";
pub const ENV_MODEL_NAME: &str = "MODEL_NAME";
pub const ENV_DB_PATH: &str = "DB_PATH";
pub const ENV_TIMEOUT_SECS: &str = "EVPLAN_LLM_TIMEOUT_SECS";
pub const ENV_BIND: &str = "EVPLAN_BIND";
pub const ENV_LOG_LEVEL: &str = "EVPLAN_LOG_LEVEL";
pub const ENV_CONFIG: &str = "EVPLAN_CONFIG";

/// Compiled defaults used when no other source provides a value
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const BASE_URL: &'static str = "http://localhost:8202";
    pub const MODEL_NAME: &'static str = "meta/llama3.1-8b-instruct";
    pub const DB_PATH: &'static str = "event_planning.db";
    pub const TIMEOUT_SECS: u64 = 60;
    pub const BIND: &'static str = "127.0.0.1:5780";
    pub const LOG_LEVEL: &'static str = "info";
}

/// On-disk TOML configuration. Every key is optional.
///
/// ```toml
/// db_path = "event_planning.db"
///
/// [llm]
/// base_url = "http://localhost:8202"
/// api_key = "nvapi-..."
/// model = "meta/llama3.1-8b-instruct"
/// timeout_secs = 60
///
/// [server]
/// bind = "127.0.0.1:5780"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TomlConfig {
    pub db_path: Option<PathBuf>,
    pub llm: LlmToml,
    pub server: ServerToml,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmToml {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerToml {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub db_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
}

/// Completion endpoint settings
#[derive(Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub model_name: String,
    pub timeout: Duration,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model_name", &self.model_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub llm: LlmSettings,
    pub db_path: PathBuf,
    pub server: ServerSettings,
    pub log_level: String,
}

impl Settings {
    /// Resolve settings from all four tiers.
    ///
    /// The TOML file is taken from the CLI, then `EVPLAN_CONFIG`, then
    /// `<config_dir>/evplan/config.toml`. A missing file falls back to
    /// defaults; a malformed one is an error.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let config_path = cli
            .config_file
            .clone()
            .or_else(|| env_var(ENV_CONFIG).map(PathBuf::from))
            .or_else(default_config_path);

        let toml_config = match config_path {
            Some(path) if path.exists() => {
                info!("Loading config file: {}", path.display());
                load_toml_config(&path)?
            }
            Some(path) => {
                if cli.config_file.is_some() {
                    warn!("Config file not found: {} (using defaults)", path.display());
                } else {
                    debug!("No config file at {}", path.display());
                }
                TomlConfig::default()
            }
            None => TomlConfig::default(),
        };

        Self::from_sources(cli, &toml_config)
    }

    /// Merge CLI, environment and an already-loaded TOML config
    pub fn from_sources(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let base_url = pick(
            cli.base_url.clone(),
            ENV_BASE_URL,
            toml_config.llm.base_url.clone(),
            CompiledDefaults::BASE_URL,
        );
        let api_key = pick(
            cli.api_key.clone(),
            ENV_API_KEY,
            toml_config.llm.api_key.clone(),
            "",
        );
        let model_name = pick(
            cli.model_name.clone(),
            ENV_MODEL_NAME,
            toml_config.llm.model.clone(),
            CompiledDefaults::MODEL_NAME,
        );
        let db_path = cli
            .db_path
            .clone()
            .or_else(|| env_var(ENV_DB_PATH).map(PathBuf::from))
            .or_else(|| toml_config.db_path.clone())
            .unwrap_or_else(|| PathBuf::from(CompiledDefaults::DB_PATH));

        let timeout_secs = match cli.timeout_secs {
            Some(secs) => secs,
            None => match env_var(ENV_TIMEOUT_SECS) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!(
                        "{} must be a whole number of seconds, got {:?}",
                        ENV_TIMEOUT_SECS, raw
                    ))
                })?,
                None => toml_config
                    .llm
                    .timeout_secs
                    .unwrap_or(CompiledDefaults::TIMEOUT_SECS),
            },
        };
        if timeout_secs == 0 {
            return Err(Error::Config("LLM request timeout must be at least 1 second".to_string()));
        }

        let bind = pick(
            cli.bind.clone(),
            ENV_BIND,
            toml_config.server.bind.clone(),
            CompiledDefaults::BIND,
        );
        let log_level = pick(
            cli.log_level.clone(),
            ENV_LOG_LEVEL,
            toml_config.logging.level.clone(),
            CompiledDefaults::LOG_LEVEL,
        );

        if base_url.trim().is_empty() {
            return Err(Error::Config("LLM base URL must not be empty".to_string()));
        }

        Ok(Self {
            llm: LlmSettings {
                base_url,
                api_key,
                model_name,
                timeout: Duration::from_secs(timeout_secs),
            },
            db_path,
            server: ServerSettings { bind },
            log_level,
        })
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Platform config location: `~/.config/evplan/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("evplan").join("config.toml"))
}

fn pick(cli: Option<String>, env_name: &str, toml_value: Option<String>, default: &str) -> String {
    cli.or_else(|| env_var(env_name))
        .or(toml_value)
        .unwrap_or_else(|| default.to_string())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
