use std::time::Duration;

use chrono::NaiveDate;
use prop_core::{ConversionError, MapResolver, PropError, Properties, PropType, PropValue};
use prop_macros::{PropEnum, Properties as DeriveProperties};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PropEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, PartialEq, DeriveProperties)]
struct AppConfig {
    #[property(name = "app.name")]
    name: String,
    #[property(name = "app.port", default = "8080")]
    port: u16,
    #[property(name = "app.hosts", delimiter = ";", strip_empty)]
    hosts: Vec<String>,
    #[property(name = "app.log_level")]
    log_level: LogLevel,
    #[property(name = "app.timeout")]
    timeout: Duration,
    #[property(name = "app.launch", format = "%d/%m/%Y")]
    launch: NaiveDate,
    #[property(name = "app.motto")]
    motto: Option<String>,
}

/// Test factory functions
fn props() -> Properties {
    Properties::builder()
        .with_resolver(MapResolver::from_iter([
            ("app.name", "demo"),
            ("app.hosts", "a;;b"),
            ("app.log_level", "Info"),
            ("app.timeout", "1500"),
            ("app.launch", "01/02/2024"),
            ("app.motto", "ship it"),
        ]))
        .build()
        .unwrap()
}

#[test]
fn test_derived_struct_loads_every_field() {
    let config = AppConfig::load(&props()).unwrap();

    assert_eq!(
        config,
        AppConfig {
            name: "demo".to_string(),
            port: 8080,
            hosts: vec!["a".to_string(), "b".to_string()],
            log_level: LogLevel::Info,
            timeout: Duration::from_millis(1500),
            launch: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            motto: Some("ship it".to_string()),
        }
    );
}

#[test]
fn test_default_applies_only_when_unresolved() {
    let props = Properties::builder()
        .with_resolver(MapResolver::from_iter([
            ("app.name", "demo"),
            ("app.port", "9090"),
            ("app.hosts", "a"),
            ("app.log_level", "Warn"),
            ("app.timeout", "2s"),
            ("app.launch", "31/12/2023"),
            ("app.motto", "x"),
        ]))
        .build()
        .unwrap();

    let config = AppConfig::load(&props).unwrap();
    assert_eq!(config.port, 9090);
    assert_eq!(config.timeout, Duration::from_secs(2));
}

#[test]
fn test_missing_required_field_fails() {
    let props = Properties::builder()
        .with_resolver(MapResolver::from_iter([("app.name", "demo")]))
        .build()
        .unwrap();

    let err = AppConfig::load(&props).unwrap_err();
    assert!(matches!(err, PropError::Unresolved(name) if name == "app.hosts"));
}

#[test]
fn test_derived_enum_rejects_unknown_variant() {
    let props = Properties::builder()
        .with_resolver(MapResolver::from_iter([("level", "Verbose")]))
        .build()
        .unwrap();

    let err = props.resolve_as::<LogLevel>("level").unwrap_err();
    assert!(matches!(
        err,
        PropError::Conversion(ConversionError::InvalidValue { .. })
    ));
}

#[test]
fn test_derived_enum_prop_type_round_trip() {
    let value = PropValue::Enum {
        type_name: "LogLevel",
        variant: "Error".to_string(),
    };
    assert_eq!(LogLevel::from_value(value).unwrap(), LogLevel::Error);

    let mismatch = LogLevel::from_value(PropValue::Bool(true)).unwrap_err();
    assert!(matches!(mismatch, ConversionError::ValueMismatch { .. }));
}
