//! Taskhive server configuration core.
//!
//! Resolves the process configuration at startup: loads the JSON document,
//! applies defaults and environment overrides, selects the active database
//! backend, and provisions cookie secrets. The HTTP and storage layers
//! attach to the resulting [`ConfigContext`].

pub mod config;

pub use config::context::ConfigContext;
pub use config::database::DbDriver;
pub use config::error::ConfigError;
pub use config::schema::{AppConfig, DbConfig};
pub use config::secrets::{Authenticator, SecretPolicy};
