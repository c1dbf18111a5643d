//! Settings resolution tests
//!
//! Verifies the CLI → ENV → TOML → default priority order and the handling of
//! missing or malformed config files.
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Every test
//! here touches process environment, so all are marked #[serial].

use evplan_common::config::{
    load_toml_config, CliOverrides, CompiledDefaults, Settings, TomlConfig, ENV_API_KEY,
    ENV_BASE_URL, ENV_BIND, ENV_CONFIG, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_MODEL_NAME,
    ENV_TIMEOUT_SECS,
};
use evplan_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn clear_env() {
    for name in [
        ENV_BASE_URL,
        ENV_API_KEY,
        ENV_MODEL_NAME,
        ENV_DB_PATH,
        ENV_TIMEOUT_SECS,
        ENV_BIND,
        ENV_LOG_LEVEL,
        ENV_CONFIG,
    ] {
        env::remove_var(name);
    }
}

fn toml_with_model(model: &str) -> TomlConfig {
    toml::from_str(&format!(
        r#"
        db_path = "from-toml.db"

        [llm]
        base_url = "http://toml-host:9000"
        model = "{}"
        timeout_secs = 15
        "#,
        model
    ))
    .unwrap()
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let settings =
        Settings::from_sources(&CliOverrides::default(), &TomlConfig::default()).unwrap();

    assert_eq!(settings.llm.base_url, CompiledDefaults::BASE_URL);
    assert_eq!(settings.llm.api_key, "");
    assert_eq!(settings.llm.model_name, CompiledDefaults::MODEL_NAME);
    assert_eq!(settings.llm.timeout, Duration::from_secs(CompiledDefaults::TIMEOUT_SECS));
    assert_eq!(settings.db_path, PathBuf::from("event_planning.db"));
    assert_eq!(settings.server.bind, CompiledDefaults::BIND);
    assert_eq!(settings.log_level, "info");
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();

    let settings =
        Settings::from_sources(&CliOverrides::default(), &toml_with_model("toml/model"))
            .unwrap();

    assert_eq!(settings.llm.base_url, "http://toml-host:9000");
    assert_eq!(settings.llm.model_name, "toml/model");
    assert_eq!(settings.llm.timeout, Duration::from_secs(15));
    assert_eq!(settings.db_path, PathBuf::from("from-toml.db"));
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_MODEL_NAME, "env/model");
    env::set_var(ENV_DB_PATH, "from-env.db");
    env::set_var(ENV_TIMEOUT_SECS, "7");

    let settings =
        Settings::from_sources(&CliOverrides::default(), &toml_with_model("toml/model"))
            .unwrap();

    assert_eq!(settings.llm.model_name, "env/model");
    assert_eq!(settings.db_path, PathBuf::from("from-env.db"));
    assert_eq!(settings.llm.timeout, Duration::from_secs(7));
    // not set in env, still from TOML
    assert_eq!(settings.llm.base_url, "http://toml-host:9000");

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_MODEL_NAME, "env/model");
    env::set_var(ENV_BASE_URL, "http://env-host:1234");

    let cli = CliOverrides {
        model_name: Some("cli/model".to_string()),
        db_path: Some(PathBuf::from("from-cli.db")),
        ..Default::default()
    };
    let settings = Settings::from_sources(&cli, &toml_with_model("toml/model")).unwrap();

    assert_eq!(settings.llm.model_name, "cli/model");
    assert_eq!(settings.llm.base_url, "http://env-host:1234");
    assert_eq!(settings.db_path, PathBuf::from("from-cli.db"));

    clear_env();
}

#[test]
#[serial]
fn test_blank_env_value_is_ignored() {
    clear_env();
    env::set_var(ENV_MODEL_NAME, "   ");

    let settings =
        Settings::from_sources(&CliOverrides::default(), &TomlConfig::default()).unwrap();

    assert_eq!(settings.llm.model_name, CompiledDefaults::MODEL_NAME);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_timeout_is_config_error() {
    clear_env();
    env::set_var(ENV_TIMEOUT_SECS, "soon");

    let result = Settings::from_sources(&CliOverrides::default(), &TomlConfig::default());
    assert!(matches!(result, Err(Error::Config(_))));

    env::set_var(ENV_TIMEOUT_SECS, "0");
    let result = Settings::from_sources(&CliOverrides::default(), &TomlConfig::default());
    assert!(matches!(result, Err(Error::Config(_))));

    clear_env();
}

#[test]
#[serial]
fn test_resolve_reads_config_file_from_env() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [llm]
        model = "file/model"

        [server]
        bind = "0.0.0.0:9999"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();
    env::set_var(ENV_CONFIG, &path);

    let settings = Settings::resolve(&CliOverrides::default()).unwrap();

    assert_eq!(settings.llm.model_name, "file/model");
    assert_eq!(settings.server.bind, "0.0.0.0:9999");
    assert_eq!(settings.log_level, "debug");

    clear_env();
}

#[test]
#[serial]
fn test_resolve_with_missing_config_file_uses_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();

    let cli = CliOverrides {
        config_file: Some(dir.path().join("does-not-exist.toml")),
        ..Default::default()
    };
    let settings = Settings::resolve(&cli).unwrap();

    assert_eq!(settings.llm.model_name, CompiledDefaults::MODEL_NAME);
}

#[test]
#[serial]
fn test_malformed_config_file_is_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[llm\nmodel = ").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));

    let cli = CliOverrides {
        config_file: Some(path),
        ..Default::default()
    };
    assert!(matches!(Settings::resolve(&cli), Err(Error::Config(_))));
}
