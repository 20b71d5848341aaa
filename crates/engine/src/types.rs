//! Typed operation inputs and wire-shaped results.
//!
//! The result structs serialize to the exact JSON the original tool
//! surface exposes. Note the `tags` field on search and bootstrap items:
//! it is a JSON-encoded string *inside* the outer JSON — a long-standing
//! artefact of the tool-result envelope that downstream agents parse, so
//! the double encoding is part of the wire contract.

use serde::Serialize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Write
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Input of `write_memory`, before normalisation.
#[derive(Debug, Clone, Default)]
pub struct WriteMemory {
    pub kind: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub content_compact: Option<String>,
    pub workspace_hint: Option<String>,
    pub importance: Option<i64>,
    pub source: Option<String>,
}

/// `{ok, action: "created"|"updated", id}`.
#[derive(Debug, Clone, Serialize)]
pub struct WriteOutcome {
    pub ok: bool,
    pub action: String,
    pub id: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Read
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A full item as returned by `read_memory`: every scalar attribute plus
/// both content forms, with `content` shaped by the caller's preference.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryRecord {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub content_compact: String,
    pub content_full: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
    pub workspace_hint: Option<String>,
    pub importance: i64,
    pub source: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One search hit. `pinned` is 0/1 and `tags` is a JSON-encoded string,
/// both historical wire shapes.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub pinned: u8,
    pub updated_at: String,
    pub has_full: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Bootstrap
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Input of `bootstrap`. Limits are clamped by the engine.
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    pub limit_pinned: i64,
    pub limit_recent: i64,
    pub workspace_hint: String,
    pub mode: mn_shaper::BootstrapMode,
    pub max_tokens: i64,
    pub max_items: i64,
    pub include_sessions: bool,
}

impl Default for BootstrapRequest {
    fn default() -> Self {
        Self {
            limit_pinned: 8,
            limit_recent: 10,
            workspace_hint: "global".into(),
            mode: mn_shaper::BootstrapMode::Full,
            max_tokens: 0,
            max_items: 15,
            include_sessions: false,
        }
    }
}

/// One bootstrap item, shaped per the request's mode.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapItem {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub updated_at: String,
    pub has_full: bool,
}

/// The bootstrap payload. `last_session` is absent for callers that did
/// not ask for sessions (pre-sessions compatibility) and `null` when the
/// workspace has none yet.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    pub pinned: Vec<BootstrapItem>,
    pub recent: Vec<BootstrapItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_session: Option<Option<SessionRecord>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One committed session, with decisions and next steps materialised back
/// into ordered lists.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub id: String,
    pub created_at: String,
    pub workspace_hint: String,
    pub summary: String,
    pub decisions: Vec<String>,
    pub next_steps: Vec<String>,
}

/// `{ok: true}`.
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub ok: bool,
}

// ── helpers ─────────────────────────────────────────────────────────

/// Encode a string list as its JSON text form.
pub(crate) fn json_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_session_field_is_absent_by_default() {
        let result = BootstrapResult {
            pinned: vec![],
            recent: vec![],
            last_session: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("last_session").is_none());
    }

    #[test]
    fn last_session_serialises_null_when_requested_but_missing() {
        let result = BootstrapResult {
            pinned: vec![],
            recent: vec![],
            last_session: Some(None),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("last_session").unwrap().is_null());
    }

    #[test]
    fn json_list_round_trips() {
        assert_eq!(json_list(&[]), "[]");
        assert_eq!(
            json_list(&["a".to_string(), "b".to_string()]),
            r#"["a","b"]"#
        );
    }
}
