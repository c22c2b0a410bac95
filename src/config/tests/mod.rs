//! Unit tests for config module
//!
//! Tests configuration types, defaults, overrides and TOML parsing.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use crate::{
    ClockError,
    config::{ClockConfig, ClockOverrides, Config, ConfigFile, LogLevel},
};

#[test]
fn clock_defaults() {
    let clock = ClockConfig::default();

    assert_eq!(clock.time_format, "15:04");
    assert_eq!(clock.date_format, "Monday, January 2");
    assert_eq!(clock.timezone, "Local");
}

#[test]
fn overriding_time_format_keeps_other_defaults() {
    let overrides = ClockOverrides {
        time_format: Some("3:04 PM".to_string()),
        ..ClockOverrides::default()
    };

    let clock = ClockConfig::default().merge(overrides);

    assert_eq!(clock.time_format, "3:04 PM");
    assert_eq!(clock.date_format, "Monday, January 2");
    assert_eq!(clock.timezone, "Local");
}

#[test]
fn empty_string_override_is_applied() {
    let overrides = ClockOverrides {
        timezone: Some(String::new()),
        ..ClockOverrides::default()
    };

    let clock = ClockConfig::default().merge(overrides);

    assert_eq!(clock.timezone, "");
}

#[test]
fn empty_toml_yields_defaults() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn snake_case_fields_are_read() {
    let config = Config::from_toml_str(
        r#"
        [general]
        log_level = "debug"

        [clock]
        date_format = "2006-01-02"
        timezone = "America/New_York"
    "#,
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.clock.time_format, "15:04");
    assert_eq!(config.clock.date_format, "2006-01-02");
    assert_eq!(config.clock.timezone, "America/New_York");
}

#[test]
fn pascal_case_field_names_are_accepted() {
    let config = Config::from_toml_str(
        r#"
        [clock]
        TimeFormat = "03:04:05 PM"
        Timezone = "UTC"
    "#,
    )
    .unwrap();

    assert_eq!(config.clock.time_format, "03:04:05 PM");
    assert_eq!(config.clock.date_format, "Monday, January 2");
    assert_eq!(config.clock.timezone, "UTC");
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Config::from_toml_str("[clock\ntimezone = ").unwrap_err();

    assert!(matches!(err, ClockError::TomlParseError { .. }));
}

#[test]
fn wrong_field_type_is_a_validation_error() {
    let err = Config::from_toml_str("[clock]\ntimezone = 42").unwrap_err();

    assert!(matches!(err, ClockError::ConfigValidation { .. }));
}

#[test]
fn imports_in_plain_strings_are_rejected() {
    let err = Config::from_toml_str("imports = [\"@shared\"]").unwrap_err();

    assert!(matches!(err, ClockError::ConfigValidation { .. }));
}

#[test]
fn scalar_imports_in_strings_are_rejected() {
    let err = Config::from_toml_str("imports = \"@shared\"").unwrap_err();

    match err {
        ClockError::ConfigValidation { details, .. } => {
            assert!(details.contains("array of strings"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn with_overrides_leaves_general_untouched() {
    let config = Config::from_toml_str("[general]\nlog_level = \"warn\"").unwrap();

    let config = config.with_overrides(ClockOverrides {
        timezone: Some("Asia/Kolkata".to_string()),
        ..ClockOverrides::default()
    });

    assert_eq!(config.general.log_level, LogLevel::Warn);
    assert_eq!(config.clock.timezone, "Asia/Kolkata");
}

#[test]
fn effective_config_serializes_to_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[clock]"));
    assert!(toml_str.contains("time_format = \"15:04\""));
}

#[test]
fn unset_overrides_are_not_serialized() {
    let file = ConfigFile::default();

    let toml_str = toml::to_string(&file).unwrap();

    assert!(!toml_str.contains("time_format"));
    assert!(!toml_str.contains("imports"));
}
