//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration document for the server.
//! All types derive Serde traits for deserialization from the JSON config
//! file; the same shapes serialize back out for the setup tooling.

use serde::{Deserialize, Serialize};

use crate::config::database::DbDriver;

/// One candidate database backend and its credentials.
///
/// A descriptor is "present" once it has a host. The dialect tag is
/// stamped by backend selection, never read from the file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DbConfig {
    /// Dialect of the selected backend; unset on raw candidates.
    #[serde(skip)]
    pub dialect: Option<DbDriver>,

    /// Server hostname, or the store path for the embedded backend.
    pub host: String,

    /// Username for the connection.
    pub user: String,

    /// Password for the connection.
    pub pass: String,

    /// Database name.
    pub name: String,
}

impl DbConfig {
    /// A backend counts as configured once its host is non-empty.
    pub fn is_present(&self) -> bool {
        !self.host.is_empty()
    }

    /// Clone this descriptor with a dialect stamp.
    pub(crate) fn tagged(&self, dialect: DbDriver) -> Self {
        Self {
            dialect: Some(dialect),
            ..self.clone()
        }
    }
}

/// LDAP attribute mapping from directory entries to user fields.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LdapMappings {
    pub dn: String,
    pub mail: String,
    pub uid: String,
    pub cn: String,
}

/// Root configuration document for the server.
///
/// Decoded once per process and owned by the
/// [`ConfigContext`](crate::config::context::ConfigContext) after
/// validation; read-only from then on.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// MySQL backend candidate.
    pub mysql: DbConfig,

    /// Embedded key-value store candidate.
    pub bolt: DbConfig,

    /// Postgres backend candidate.
    pub pgsql: DbConfig,

    /// Listen port in `:port` form, eg `:3000`. A missing colon is
    /// restored by validation.
    pub port: String,

    /// Interface IP put in front of the port. Defaults to empty.
    pub interface: String,

    /// Ephemeral project storage.
    pub tmp_path: String,

    /// Cookie signing key, base64.
    pub cookie_hash: String,

    /// Cookie encryption key, base64. Empty means signing only.
    pub cookie_encryption: String,

    /// Email alerting.
    pub email_sender: String,
    pub email_host: String,
    pub email_port: String,

    /// Public route to this server.
    pub web_host: String,

    /// LDAP settings.
    pub ldap_binddn: String,
    pub ldap_bindpassword: String,
    pub ldap_server: String,
    pub ldap_searchdn: String,
    pub ldap_searchfilter: String,
    pub ldap_mappings: LdapMappings,

    /// Telegram alerting.
    pub telegram_chat: String,
    pub telegram_token: String,

    /// Task concurrency.
    pub concurrency_mode: String,
    pub max_parallel_tasks: i64,

    /// Feature switches.
    pub email_alert: bool,
    pub telegram_alert: bool,
    pub ldap_enable: bool,
    pub ldap_needtls: bool,
}

impl AppConfig {
    /// Render the document as indented JSON for display and setup tooling.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
    }
}
