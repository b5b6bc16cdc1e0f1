//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (defaults, env overrides, exclusivity check)
//!     → secrets.rs (cookie authenticator + public host URL)
//!     → ConfigContext (validated, immutable)
//!     → shared by reference with all subsystems
//! ```
//!
//! # Design Decisions
//! - The context is immutable once built; there is no global config state
//! - All document fields have defaults so a minimal config decodes
//! - Validation separates syntactic (serde) from semantic checks
//! - Backend selection and connection-string derivation are pure functions

pub mod context;
pub mod database;
pub mod error;
pub mod loader;
pub mod schema;
pub mod secrets;
pub mod validation;

pub use context::ConfigContext;
pub use database::DbDriver;
pub use error::ConfigError;
pub use schema::{AppConfig, DbConfig};
pub use secrets::{Authenticator, SecretPolicy};
