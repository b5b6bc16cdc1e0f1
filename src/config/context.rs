//! Process-wide configuration context.
//!
//! Built once at startup, before any concurrent work begins, and handed by
//! reference to every subsystem that needs the document, the cookie
//! authenticator, or the public host URL. Nothing mutates it after
//! construction, so concurrent readers need no locking.

use std::path::Path;

use url::Url;

use crate::config::error::ConfigResult;
use crate::config::loader;
use crate::config::schema::AppConfig;
use crate::config::secrets::{self, Authenticator, SecretPolicy};
use crate::config::validation;

/// Immutable configuration state shared across the process.
#[derive(Debug, Clone)]
pub struct ConfigContext {
    /// The validated configuration document.
    pub config: AppConfig,

    /// Cookie signing/encryption capability derived from the document.
    pub cookie: Authenticator,

    /// Public route to this server, when one is configured.
    pub web_host: Option<Url>,
}

impl ConfigContext {
    /// Run the full startup sequence: load, validate, provision secrets.
    pub fn initialize(explicit: Option<&Path>, policy: SecretPolicy) -> ConfigResult<Self> {
        let config = loader::load(explicit)?;
        Self::from_document(config, policy)
    }

    /// Build a context from an already decoded document, applying the same
    /// validation and provisioning. Used by setup tooling and tests.
    pub fn from_document(mut config: AppConfig, policy: SecretPolicy) -> ConfigResult<Self> {
        validation::validate(&mut config)?;
        let (cookie, web_host) = secrets::provision(&config, policy)?;

        Ok(Self {
            config,
            cookie,
            web_host,
        })
    }
}
