use crate::tests::{EnvGuard, setup_config_dir, write_config};
use crate::{Config, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_eq!(config.api.base_url, crate::DEFAULT_BASE_URL);
    assert_that!(config.api.timeout_secs, eq(crate::DEFAULT_TIMEOUT_SECS));
    assert_that!(*config.logging.level, eq(LevelFilter::Warn));
    assert_eq!(config.session.token_file, "session.token");
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_created() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let nested = temp.path().join("nested");
    let _dir = EnvGuard::set("LM_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.is_dir());
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [api]
            base_url = "https://licenses.example.com"
            timeout_secs = 10

            [logging]
            level = "debug"
            colored = false
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.api.base_url, "https://licenses.example.com");
    assert_that!(config.api.timeout_secs, eq(10));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[api]\nbase_url = \"http://from-file:1\"");
    let _url = EnvGuard::set("LM_API_BASE_URL", "http://from-env:2");
    let _timeout = EnvGuard::set("LM_API_TIMEOUT_SECS", "5");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.api.base_url, "http://from-env:2");
    assert_that!(config.api.timeout_secs, eq(5));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_keeps_previous_value() {
    // Given
    let _temp = setup_config_dir();
    let _timeout = EnvGuard::set("LM_API_TIMEOUT_SECS", "soon");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.api.timeout_secs, eq(crate::DEFAULT_TIMEOUT_SECS));
}

#[test]
#[serial]
fn given_log_env_vars_when_load_then_logging_overridden() {
    // Given
    let _temp = setup_config_dir();
    let _level = EnvGuard::set("LM_LOG_LEVEL", "trace");
    let _colored = EnvGuard::set("LM_LOG_COLORED", "0");
    let _file = EnvGuard::set("LM_LOG_FILE", "lm.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Trace));
    assert_that!(config.logging.colored, eq(false));
    assert_eq!(config.logging.file.as_deref(), Some("lm.log"));
}

#[test]
#[serial]
fn given_default_session_when_token_path_then_inside_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let path = config.token_path().unwrap();

    // Then
    assert_eq!(path, temp.path().join("session.token"));
}

// =========================================================================
// LogLevel
// =========================================================================

#[test]
fn given_unknown_level_when_parsed_then_falls_back_to_default() {
    assert_eq!(LogLevel::from_str("loud").unwrap().0, LevelFilter::Warn);
    assert_eq!(LogLevel::from_str(" INFO ").unwrap().0, LevelFilter::Info);
}
