//! Configuration validation.
//!
//! # Responsibilities
//! - Apply defaults (listen port, tmp path, task parallelism)
//! - Apply environment overrides (`PORT`)
//! - Reject ambiguous database configuration
//!
//! # Design Decisions
//! - Runs once at startup, before the config is accepted into the context
//! - Idempotent: re-validating an already validated document is a no-op
//! - Email/LDAP/telegram settings pass through untouched; those
//!   subsystems surface their own failures on use

use std::env;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::AppConfig;

const DEFAULT_PORT: &str = ":3000";
const DEFAULT_TMP_PATH: &str = "/tmp/taskhive";
const DEFAULT_MAX_PARALLEL_TASKS: i64 = 10;

/// Apply defaults and overrides in place, then check invariants.
pub fn validate(config: &mut AppConfig) -> ConfigResult<()> {
    validate_port(config);

    if config.tmp_path.is_empty() {
        config.tmp_path = DEFAULT_TMP_PATH.to_string();
    }

    if config.max_parallel_tasks < 1 {
        config.max_parallel_tasks = DEFAULT_MAX_PARALLEL_TASKS;
    }

    check_backend_exclusivity(config)
}

/// Resolve the listen port.
///
/// Precedence: a non-empty `PORT` environment variable beats the file
/// value, an empty field falls back to the default, and a missing leading
/// colon is restored last so every path ends in `:port` form.
fn validate_port(config: &mut AppConfig) {
    if let Ok(port) = env::var("PORT") {
        if !port.is_empty() {
            config.port = format!(":{}", port);
        }
    }
    if config.port.is_empty() {
        config.port = DEFAULT_PORT.to_string();
    }
    if !config.port.starts_with(':') {
        config.port = format!(":{}", config.port);
    }
}

/// At most one backend descriptor may carry a host. Ambiguity is a
/// startup error rather than a silent priority pick.
fn check_backend_exclusivity(config: &AppConfig) -> ConfigResult<()> {
    let configured: Vec<&'static str> = [
        ("mysql", config.mysql.is_present()),
        ("bolt", config.bolt.is_present()),
        ("pgsql", config.pgsql.is_present()),
    ]
    .into_iter()
    .filter(|(_, present)| *present)
    .map(|(name, _)| name)
    .collect();

    if configured.len() > 1 {
        return Err(ConfigError::AmbiguousBackends(configured));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that read or write the PORT variable serialize on this lock;
    // the test harness runs them on shared process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_empty_port_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig::default();
        validate(&mut config).unwrap();
        assert_eq!(config.port, ":3000");
    }

    #[test]
    fn test_port_colon_restored() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig {
            port: "8080".to_string(),
            ..AppConfig::default()
        };
        validate(&mut config).unwrap();
        assert_eq!(config.port, ":8080");
    }

    #[test]
    fn test_prefixed_port_unchanged() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig {
            port: ":9000".to_string(),
            ..AppConfig::default()
        };
        validate(&mut config).unwrap();
        assert_eq!(config.port, ":9000");
    }

    #[test]
    fn test_env_port_beats_file_value() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PORT", "5000");

        let mut config = AppConfig {
            port: ":9000".to_string(),
            ..AppConfig::default()
        };
        validate(&mut config).unwrap();
        env::remove_var("PORT");

        assert_eq!(config.port, ":5000");
    }

    #[test]
    fn test_tmp_path_and_parallelism_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig::default();
        validate(&mut config).unwrap();
        assert_eq!(config.tmp_path, "/tmp/taskhive");
        assert_eq!(config.max_parallel_tasks, 10);

        let mut config = AppConfig {
            tmp_path: "/data/hive".to_string(),
            max_parallel_tasks: 25,
            ..AppConfig::default()
        };
        validate(&mut config).unwrap();
        assert_eq!(config.tmp_path, "/data/hive");
        assert_eq!(config.max_parallel_tasks, 25);
    }

    #[test]
    fn test_negative_parallelism_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig {
            max_parallel_tasks: -3,
            ..AppConfig::default()
        };
        validate(&mut config).unwrap();
        assert_eq!(config.max_parallel_tasks, 10);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig {
            port: "8080".to_string(),
            ..AppConfig::default()
        };
        validate(&mut config).unwrap();
        let first_pass = config.clone();

        validate(&mut config).unwrap();
        assert_eq!(config, first_pass);
    }

    #[test]
    fn test_single_backend_accepted() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig::default();
        config.pgsql.host = "db.internal".to_string();
        assert!(validate(&mut config).is_ok());
    }

    #[test]
    fn test_ambiguous_backends_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");

        let mut config = AppConfig::default();
        config.mysql.host = "127.0.0.1:3306".to_string();
        config.pgsql.host = "db.internal".to_string();

        let err = validate(&mut config).unwrap_err();
        match err {
            ConfigError::AmbiguousBackends(names) => {
                assert_eq!(names, vec!["mysql", "pgsql"]);
            }
            other => panic!("expected AmbiguousBackends, got {:?}", other),
        }
    }
}
