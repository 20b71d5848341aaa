use std::sync::Arc;

use mn_domain::config::Config;
use mn_engine::MemoryEngine;

/// Shared application state passed to all request handlers.
///
/// Both fields are set once at startup and immutable afterwards; requests
/// share them read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<MemoryEngine>,
}
