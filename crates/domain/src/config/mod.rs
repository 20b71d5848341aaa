mod server;
mod store;

pub use server::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Process configuration, resolved once at startup and immutable after.
///
/// Mnemosyne is configured through environment variables only (the names
/// are part of the deployment contract); [`Config::from_env`] is the one
/// place they are read.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Resolve the full configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            store: StoreConfig::from_env(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.server.port == 0 {
            issues.push(ConfigIssue {
                severity: ConfigSeverity::Error,
                field: "server.port".into(),
                message: "port must be greater than 0".into(),
            });
        }

        if self.server.bind.is_empty() {
            issues.push(ConfigIssue {
                severity: ConfigSeverity::Error,
                field: "server.bind".into(),
                message: "bind address must not be empty".into(),
            });
        }

        if self.store.uri.is_empty() {
            issues.push(ConfigIssue {
                severity: ConfigSeverity::Error,
                field: "store.uri".into(),
                message: "NEO4J_URI must not be empty".into(),
            });
        }

        // Bolt is the only protocol the driver speaks.
        if !self.store.uri.is_empty()
            && !self.store.uri.starts_with("bolt://")
            && !self.store.uri.starts_with("bolt+s://")
            && !self.store.uri.starts_with("neo4j://")
            && !self.store.uri.starts_with("neo4j+s://")
        {
            issues.push(ConfigIssue {
                severity: ConfigSeverity::Warning,
                field: "store.uri".into(),
                message: format!(
                    "NEO4J_URI does not look like a bolt:// or neo4j:// URI (got \"{}\")",
                    self.store.uri
                ),
            });
        }

        if self.store.password.is_empty() {
            issues.push(ConfigIssue {
                severity: ConfigSeverity::Warning,
                field: "store.password".into(),
                message: "NEO4J_PASSWORD is empty".into(),
            });
        }

        issues
    }
}
