//! End-to-end configuration resolution over real files.

use std::fs;

use taskhive::{AppConfig, ConfigContext, ConfigError, DbDriver, SecretPolicy};

#[test]
fn test_full_startup_sequence() {
    std::env::remove_var("PORT");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "mysql": {"host": "127.0.0.1:3306", "user": "hive", "pass": "secret", "name": "hive"},
            "cookie_hash": "aGFzaC1rZXktaGFzaC1rZXktaGFzaC1rZXktaGFzaA==",
            "web_host": "https://hive.example.com"
        }"#,
    )
    .unwrap();

    let context = ConfigContext::initialize(Some(&path), SecretPolicy::default()).unwrap();

    // Defaults fill the fields the file left out.
    assert_eq!(context.config.port, ":3000");
    assert_eq!(context.config.tmp_path, "/tmp/taskhive");
    assert_eq!(context.config.max_parallel_tasks, 10);

    assert!(!context.cookie.supports_encryption());
    assert_eq!(
        context.web_host.as_ref().and_then(|url| url.host_str()),
        Some("hive.example.com")
    );

    let db = context.config.active_database().unwrap();
    assert_eq!(db.dialect, Some(DbDriver::MySql));
    assert_eq!(
        db.connection_string(true).unwrap(),
        "hive:secret@tcp(127.0.0.1:3306)/hive?parseTime=true&interpolateParams=true"
    );
}

#[test]
fn test_setup_document_round_trips_through_startup() {
    let mut config = AppConfig::default();
    config.bolt.host = "/var/lib/taskhive/store.db".to_string();
    config.generate_cookie_secrets();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, config.to_json().unwrap()).unwrap();

    // Generated secrets survive the strict policy.
    let context = ConfigContext::initialize(Some(&path), SecretPolicy::Reject).unwrap();
    assert!(context.cookie.supports_encryption());
    assert_eq!(context.cookie.hash_key().len(), 32);

    let db = context.config.active_database().unwrap();
    assert_eq!(db.dialect, Some(DbDriver::Bolt));
    assert_eq!(
        db.connection_string(true).unwrap(),
        "/var/lib/taskhive/store.db"
    );
}

#[test]
fn test_missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let err = ConfigContext::initialize(Some(&missing), SecretPolicy::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_file_reports_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ConfigContext::initialize(Some(&path), SecretPolicy::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Decode(_)));
}
