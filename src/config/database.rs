//! Database backend selection and connection-string derivation.
//!
//! # Responsibilities
//! - Tag the single active backend with its dialect
//! - Build driver connection strings from a selected descriptor
//!
//! # Design Decisions
//! - Priority order is fixed: MySQL, then the embedded store, then Postgres
//! - Selection is a pure function over the document, callable concurrently
//! - Dialect names come from an exhaustive match, not an indexed table

use std::fmt;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::{AppConfig, DbConfig};

/// Dialect tag identifying which database technology a descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbDriver {
    MySql,
    Bolt,
    Postgres,
}

impl DbDriver {
    /// Driver name handed to the SQL layer. The embedded store has no
    /// driver registry entry, so it maps to the empty string.
    pub fn dialect_name(self) -> &'static str {
        match self {
            DbDriver::MySql => "mysql",
            DbDriver::Bolt => "",
            DbDriver::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DbDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DbDriver::MySql => "mysql",
            DbDriver::Bolt => "bolt",
            DbDriver::Postgres => "postgres",
        };
        f.write_str(name)
    }
}

impl AppConfig {
    /// Select the single active database backend.
    ///
    /// Descriptors are checked in priority order and the first one with a
    /// host wins; validation rejects documents where more than one is
    /// configured, so post-validation the order only breaks ties for
    /// callers that skipped it. With no backend configured this fails
    /// with a typed error so the storage layer decides how to react.
    pub fn active_database(&self) -> ConfigResult<DbConfig> {
        if self.mysql.is_present() {
            Ok(self.mysql.tagged(DbDriver::MySql))
        } else if self.bolt.is_present() {
            Ok(self.bolt.tagged(DbDriver::Bolt))
        } else if self.pgsql.is_present() {
            Ok(self.pgsql.tagged(DbDriver::Postgres))
        } else {
            Err(ConfigError::BackendNotFound)
        }
    }
}

impl DbConfig {
    /// Build the connection string for the stamped dialect.
    ///
    /// The database-name segment is optional so the storage layer can
    /// connect server-wide (eg to create the database) or per-database.
    pub fn connection_string(&self, include_db_name: bool) -> ConfigResult<String> {
        match self.dialect {
            Some(DbDriver::Bolt) => Ok(self.host.clone()),
            Some(DbDriver::MySql) => {
                let name = if include_db_name { self.name.as_str() } else { "" };
                Ok(format!(
                    "{}:{}@tcp({})/{}?parseTime=true&interpolateParams=true",
                    self.user, self.pass, self.host, name
                ))
            }
            Some(DbDriver::Postgres) => {
                let name = if include_db_name { self.name.as_str() } else { "" };
                Ok(format!(
                    "postgres://{}:{}@{}/{}",
                    self.user, self.pass, self.host, name
                ))
            }
            // Only descriptors that went through selection carry a dialect.
            None => Err(ConfigError::UnsupportedDriver("unselected")),
        }
    }
}
