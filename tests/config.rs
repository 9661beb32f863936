use std::io::Write;

use tempfile::NamedTempFile;
use wtfscript::{Config, ConfigError, Interpreter, Value};

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_partial_config() {
    let file = config_file(r#"{ "int": { "min": 1, "max": 3 }, "charset": "xy" }"#);
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.int.min, 1);
    assert_eq!(config.int.max, 3);
    assert_eq!(config.charset, "xy");
    // untouched keys keep their defaults
    assert_eq!(config.uint, Config::default().uint);
    assert_eq!(config.length.min, 10);
}

#[test]
fn test_loaded_config_drives_defaults() {
    let file = config_file(
        r#"{
            "int": { "min": 40, "max": 41 },
            "charset": "q",
            "length": { "min": 2, "max": 8 }
        }"#,
    );
    let config = Config::load(file.path()).unwrap();

    for seed in 0..10 {
        let mut interp = Interpreter::with_seed(Some(config.clone()), seed);
        interp.run("int n; string s;").unwrap();
        let n = interp.variable("n").unwrap().value.clone();
        assert!(matches!(n, Value::Int(40) | Value::Int(41)), "got {:?}", n);
        assert_eq!(interp.variable("s").unwrap().value, Value::from("qq"));
    }
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_json() {
    let file = config_file("{ \"int\": ");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("failed to parse JSON config"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        (r#"{ "int": { "min": 5, "max": 5 } }"#, "int.min (5) must be less than int.max (5)"),
        (r#"{ "charset": "" }"#, "charset cannot be empty"),
        (r#"{ "unofloat": { "min": 0.0, "max": 1.5 } }"#, "unofloat.max (1.5) must be between 0.0 and 1.0"),
        (r#"{ "length": { "min": 4, "max": 2 } }"#, "length.min (4) must not exceed length.max (2)"),
    ];

    for (json, message) in cases {
        let file = config_file(json);
        match Config::load(file.path()) {
            Err(ConfigError::Invalid(msg)) => assert_eq!(msg, message),
            other => panic!("expected invalid config for {}, got {:?}", json, other),
        }
    }
}

#[test]
fn test_config_round_trips_through_json() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
