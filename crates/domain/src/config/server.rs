use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Server
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// HTTP listener settings (`MNEMOSYNE_BIND` / `MNEMOSYNE_PORT`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "d_bind")]
    pub bind: String,
    #[serde(default = "d_8010")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: d_bind(),
            port: 8010,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind = std::env::var("MNEMOSYNE_BIND").unwrap_or_else(|_| d_bind());
        let port = std::env::var("MNEMOSYNE_PORT")
            .ok()
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(8010);
        Self { bind, port }
    }

    /// The `host:port` string to bind the listener to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_bind() -> String {
    "0.0.0.0".into()
}
fn d_8010() -> u16 {
    8010
}
