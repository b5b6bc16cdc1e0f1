//! Cookie secret provisioning.
//!
//! # Responsibilities
//! - Decode the configured cookie keys from base64
//! - Build the authenticator capability from the key material
//! - Parse the public web-host URL
//! - Generate fresh secrets during initial setup
//!
//! # Design Decisions
//! - The cookie cryptography itself lives with the HTTP layer; this module
//!   only derives key material and reports what it is capable of
//! - Malformed base64 handling is an explicit policy, not a silent default

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use url::Url;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::AppConfig;

/// Cookie keys are 32 bytes before base64 encoding.
const COOKIE_KEY_LEN: usize = 32;

/// How malformed base64 in the secret fields is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretPolicy {
    /// Malformed secrets decode to empty key material. Matches the
    /// long-standing behavior this server shipped with.
    #[default]
    TreatAsAbsent,

    /// Malformed secrets abort provisioning.
    Reject,
}

/// Signing and (optionally) encryption key material for session cookies.
#[derive(Debug, Clone)]
pub struct Authenticator {
    hash_key: Vec<u8>,
    encryption_key: Option<Vec<u8>>,
}

impl Authenticator {
    /// Construct from raw key material. An empty encryption key means the
    /// authenticator signs but does not encrypt.
    pub fn new(hash_key: Vec<u8>, encryption_key: Option<Vec<u8>>) -> Self {
        let encryption_key = encryption_key.filter(|key| !key.is_empty());
        Self {
            hash_key,
            encryption_key,
        }
    }

    /// Key used for cookie signing.
    pub fn hash_key(&self) -> &[u8] {
        &self.hash_key
    }

    /// Key used for cookie encryption, when configured.
    pub fn encryption_key(&self) -> Option<&[u8]> {
        self.encryption_key.as_deref()
    }

    /// True when cookie payloads are encrypted as well as signed.
    pub fn supports_encryption(&self) -> bool {
        self.encryption_key.is_some()
    }
}

/// Derive the cookie authenticator and public web-host URL from a
/// validated document.
pub fn provision(
    config: &AppConfig,
    policy: SecretPolicy,
) -> ConfigResult<(Authenticator, Option<Url>)> {
    let hash = decode_secret(&config.cookie_hash, "cookie_hash", policy)?;
    let encryption = if config.cookie_encryption.is_empty() {
        None
    } else {
        Some(decode_secret(
            &config.cookie_encryption,
            "cookie_encryption",
            policy,
        )?)
    };

    let authenticator = Authenticator::new(hash, encryption);
    let web_host = parse_web_host(&config.web_host);
    Ok((authenticator, web_host))
}

fn decode_secret(
    value: &str,
    field: &'static str,
    policy: SecretPolicy,
) -> ConfigResult<Vec<u8>> {
    match STANDARD.decode(value) {
        Ok(bytes) => Ok(bytes),
        Err(_) => match policy {
            SecretPolicy::TreatAsAbsent => {
                tracing::warn!(field, "cookie secret is not valid base64, treating as absent");
                Ok(Vec::new())
            }
            SecretPolicy::Reject => Err(ConfigError::MalformedSecret { field }),
        },
    }
}

/// The public host is absent when unset or unparsable.
fn parse_web_host(web_host: &str) -> Option<Url> {
    if web_host.is_empty() {
        return None;
    }
    Url::parse(web_host).ok()
}

impl AppConfig {
    /// Generate fresh cookie secrets during initial setup.
    ///
    /// Never called on normal startup; existing secrets are preserved
    /// across restarts so sessions survive.
    pub fn generate_cookie_secrets(&mut self) {
        self.cookie_hash = STANDARD.encode(generate_key());
        self.cookie_encryption = STANDARD.encode(generate_key());
    }
}

/// One fresh random cookie key.
fn generate_key() -> [u8; COOKIE_KEY_LEN] {
    let mut key = [0u8; COOKIE_KEY_LEN];
    rand::thread_rng().fill_bytes(&mut key);
    key
}
