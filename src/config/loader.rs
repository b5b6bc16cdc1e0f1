//! Configuration loading from disk.
//!
//! # Responsibilities
//! - Resolve the file path (explicit flag, or `config.json` in the cwd)
//! - Read and deserialize the JSON document
//!
//! # Design Decisions
//! - Io and decode failures are startup-fatal; the process boundary prints
//!   a setup hint and exits instead of retrying

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::AppConfig;

/// Load the configuration document from `explicit`, or from `config.json`
/// in the current working directory when no path is given.
pub fn load(explicit: Option<&Path>) -> ConfigResult<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&contents)?;

    tracing::info!(path = %path.display(), "using configuration file");
    Ok(config)
}

fn default_path() -> ConfigResult<PathBuf> {
    let cwd = env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    Ok(cwd.join("config.json"))
}
