//! Mode-driven content selection.
//!
//! Bootstrap and search decide per item how much body to ship to the
//! agent. `thin` always prefers the compact form, `full` always ships the
//! body, and `hybrid` makes an exception for short commands and patterns,
//! which are more useful verbatim than summarised.

use serde::{Deserialize, Serialize};

use crate::compact::{compact, COMPACT_MAX_CHARS};

/// Content-selection policy for bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapMode {
    Thin,
    Hybrid,
    #[default]
    Full,
}

/// Content preference for read and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentPrefer {
    Compact,
    #[default]
    Full,
}

/// Hybrid mode ships the full body for command/pattern items up to this
/// many characters.
pub const HYBRID_FULL_MAX_CHARS: usize = 300;

/// Pick the wire content for one item under the given mode.
pub fn select_content(
    kind: &str,
    content: &str,
    content_compact: &str,
    mode: BootstrapMode,
) -> String {
    match mode {
        BootstrapMode::Full => content.to_string(),
        BootstrapMode::Thin => thin(content, content_compact),
        BootstrapMode::Hybrid => {
            if matches!(kind, "command" | "pattern")
                && content.chars().count() <= HYBRID_FULL_MAX_CHARS
            {
                content.to_string()
            } else {
                thin(content, content_compact)
            }
        }
    }
}

/// The stored compact form when present, an auto-generated snippet
/// otherwise.
fn thin(content: &str, content_compact: &str) -> String {
    if !content_compact.trim().is_empty() {
        content_compact.to_string()
    } else {
        compact(content, COMPACT_MAX_CHARS)
    }
}
