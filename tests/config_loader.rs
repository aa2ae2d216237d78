mod common;

use common::temp_config;
use statecraft::config::{Config, ConfigError};
use std::path::Path;

/// Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.storage.path.ends_with("statecraft/storage.json"));
    assert_eq!(config.storage.name_key, "name");

    assert_eq!(config.fetch.base_url, "https://jsonplaceholder.typicode.com");
    assert_eq!(config.fetch.timeout_seconds, 10);
    assert_eq!(config.fetch.limit, 3);
    assert_eq!(config.fetch.default_resource, "posts");

    assert_eq!(config.memo.slow_iterations, 50_000_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("statecraft/config.toml"));
}

/// A missing file is not an error.
#[test]
fn test_missing_file_yields_defaults() {
    let config = Config::load_from(Path::new("/nonexistent/statecraft/config.toml")).unwrap();
    assert_eq!(config.fetch.limit, 3);
}

/// Sections left out of the file keep their defaults.
#[test]
fn test_partial_file_merges_with_defaults() {
    let (_dir, path) = temp_config(
        r#"
[fetch]
base_url = "http://127.0.0.1:9999"
limit = 5
"#,
    );
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.fetch.base_url, "http://127.0.0.1:9999");
    assert_eq!(config.fetch.limit, 5);
    assert_eq!(config.fetch.timeout_seconds, 10);
    assert_eq!(config.storage.name_key, "name");
}

#[test]
fn test_storage_section_is_read() {
    let (_dir, path) = temp_config(
        r#"
[storage]
path = "/tmp/statecraft-test/store.json"
name_key = "username"

[memo]
slow_iterations = 10
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config.storage.path,
        Path::new("/tmp/statecraft-test/store.json")
    );
    assert_eq!(config.storage.name_key, "username");
    assert_eq!(config.memo.slow_iterations, 10);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[fetch\nlimit = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let (_dir, path) = temp_config("[fetch]\nlimit = \"three\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

/// Each validation rule rejects its bad value.
#[test]
fn test_validation_rules() {
    let cases = [
        ("[fetch]\nbase_url = \"ftp://example.com\"\n", "base_url"),
        ("[fetch]\ntimeout_seconds = 0\n", "timeout_seconds"),
        ("[fetch]\nlimit = 0\n", "limit"),
        ("[fetch]\ndefault_resource = \"photos\"\n", "default_resource"),
        ("[storage]\nname_key = \"\"\n", "name_key"),
    ];

    for (content, field) in cases {
        let (_dir, path) = temp_config(content);
        match Config::load_from(&path) {
            Err(ConfigError::ValidationError { message }) => {
                assert!(message.contains(field), "{field}: {message}")
            }
            other => panic!("{field}: expected validation error, got {other:?}"),
        }
    }
}
