use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Graph store connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Neo4j connection settings plus the multi-tenant gate.
///
/// The multi-tenant flag is fixed for the lifetime of the process; every
/// engine operation branches on it, so flipping it at runtime would split
/// the dedup keyspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "d_uri")]
    pub uri: String,
    #[serde(default = "d_user")]
    pub user: String,
    #[serde(default = "d_password")]
    pub password: String,
    #[serde(default = "d_database")]
    pub database: String,
    #[serde(default)]
    pub multi_tenant: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: d_uri(),
            user: d_user(),
            password: d_password(),
            database: d_database(),
            multi_tenant: false,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            uri: std::env::var("NEO4J_URI").unwrap_or_else(|_| d_uri()),
            user: std::env::var("NEO4J_USER").unwrap_or_else(|_| d_user()),
            password: std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| d_password()),
            database: std::env::var("NEO4J_DATABASE").unwrap_or_else(|_| d_database()),
            multi_tenant: std::env::var("MNEMOSYNE_MULTI_TENANT")
                .map(|v| parse_multi_tenant(&v))
                .unwrap_or(false),
        }
    }
}

/// Parse the `MNEMOSYNE_MULTI_TENANT` value.
///
/// Accepted truthy tokens are `1`, `true`, `True`, `yes`; everything else
/// (including `0`, `false`, empty) leaves multi-tenancy off.
pub fn parse_multi_tenant(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "True" | "yes")
}

// ── serde default helpers ───────────────────────────────────────────

fn d_uri() -> String {
    "bolt://localhost:7687".into()
}
fn d_user() -> String {
    "neo4j".into()
}
fn d_password() -> String {
    "mnemosyne".into()
}
fn d_database() -> String {
    "neo4j".into()
}
