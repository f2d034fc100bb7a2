//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a client from it.

use std::io::Write;

use hyperstore_domain::HyperStoreError;
use hyperstore_infra::{config, HyperStoreClient};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "base_url": "https://hyperstore.example.com:19443",
            "auth_header": "Basic YWRtaW46cHVibGlj",
            "list_limit": 200,
            "timeout_secs": 15,
            "user_agent": "tenant-operator/1.0"
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from JSON file");
    assert_eq!(config.base_url, "https://hyperstore.example.com:19443");
    assert_eq!(config.list_limit().unwrap().get(), 200);
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.user_agent.as_deref(), Some("tenant-operator/1.0"));

    // the secret never shows up in debug output
    let debug = format!("{config:?}");
    assert!(!debug.contains("YWRtaW46cHVibGlj"), "{debug}");
    assert!(debug.contains("[REDACTED]"));

    let client = HyperStoreClient::new(&config).expect("client from loaded config");
    assert_eq!(client.list_limit().get(), 200);
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
base_url = "http://localhost:18081"
list_limit = 10
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from TOML file");
    assert_eq!(config.list_limit, 10);
    assert!(config.auth_header.is_none());
}

#[test]
fn test_zero_list_limit_is_rejected() {
    let path = write_config(r#"{"base_url": "http://localhost:18081", "list_limit": 0}"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    assert!(matches!(result, Err(HyperStoreError::Config(_))));
}

#[test]
fn test_malformed_file_is_config_error() {
    let path = write_config("base_url = [", "toml");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    assert!(matches!(result, Err(HyperStoreError::Config(_))));
}
