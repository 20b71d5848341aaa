//! The tool catalogue and per-tool argument parsing.
//!
//! Argument structs carry the same defaults the tools have always had, so
//! a bare `{}` call behaves identically across client generations. The
//! `*_json` inputs are lenient: native arrays and JSON-encoded array
//! strings are both accepted, and anything unparseable becomes `[]`.

use mn_shaper::{BootstrapMode, ContentPrefer};
use serde::Deserialize;
use serde_json::{json, Value};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Catalogue
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The tool definitions returned by `tools/list`.
pub fn catalogue() -> Value {
    json!([
        {
            "name": "mnemosyne_bootstrap",
            "description": "Return startup context",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "limit_pinned": {"type": "integer"},
                    "limit_recent": {"type": "integer"},
                    "workspace_hint": {"type": "string"},
                    "mode": {"type": "string", "enum": ["thin", "hybrid", "full"]},
                    "max_tokens": {"type": "integer"},
                    "max_items": {"type": "integer"},
                    "include_sessions": {"type": "boolean"}
                }
            }
        },
        {
            "name": "mnemosyne_write",
            "description": "Store memory (deduplicates by kind+title)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "kind": {"type": "string"},
                    "title": {"type": "string"},
                    "content": {"type": "string"},
                    "tags_json": {"type": "string"},
                    "pinned": {"type": "boolean"},
                    "content_compact": {"type": "string"},
                    "workspace_hint": {"type": "string"},
                    "importance": {"type": "integer"},
                    "source": {"type": "string"}
                },
                "required": ["kind", "title", "content"]
            }
        },
        {
            "name": "mnemosyne_read",
            "description": "Read a single memory item by id",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {"type": "string"},
                    "prefer": {"type": "string", "enum": ["full", "compact"]}
                },
                "required": ["id"]
            }
        },
        {
            "name": "mnemosyne_search",
            "description": "Search memory",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {"type": "string"},
                    "limit": {"type": "integer"},
                    "prefer": {"type": "string", "enum": ["compact", "full"]},
                    "snippet_chars": {"type": "integer"}
                },
                "required": ["query"]
            }
        },
        {
            "name": "mnemosyne_commit_session",
            "description": "Commit session",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "workspace_hint": {"type": "string"},
                    "summary": {"type": "string"},
                    "decisions_json": {"type": "string"},
                    "next_steps_json": {"type": "string"}
                },
                "required": ["workspace_hint", "summary"]
            }
        },
        {
            "name": "mnemosyne_last_session",
            "description": "Get most recent session logs for a workspace",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "workspace_hint": {"type": "string"},
                    "limit": {"type": "integer"}
                }
            }
        }
    ])
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Argument structs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct BootstrapArgs {
    #[serde(default = "d_limit_pinned")]
    pub limit_pinned: i64,
    #[serde(default = "d_limit_recent")]
    pub limit_recent: i64,
    #[serde(default = "d_workspace")]
    pub workspace_hint: String,
    #[serde(default)]
    pub mode: BootstrapMode,
    #[serde(default)]
    pub max_tokens: i64,
    #[serde(default = "d_max_items")]
    pub max_items: i64,
    #[serde(default)]
    pub include_sessions: bool,
}

#[derive(Debug, Deserialize)]
pub struct WriteArgs {
    pub kind: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags_json: Option<Value>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub content_compact: Option<String>,
    #[serde(default)]
    pub workspace_hint: Option<String>,
    #[serde(default)]
    pub importance: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReadArgs {
    pub id: String,
    #[serde(default)]
    pub prefer: ContentPrefer,
}

#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "d_search_limit")]
    pub limit: i64,
    #[serde(default)]
    pub prefer: ContentPrefer,
    #[serde(default = "d_snippet_chars")]
    pub snippet_chars: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommitSessionArgs {
    pub workspace_hint: String,
    pub summary: String,
    #[serde(default)]
    pub decisions_json: Option<Value>,
    #[serde(default)]
    pub next_steps_json: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LastSessionArgs {
    #[serde(default = "d_workspace")]
    pub workspace_hint: String,
    #[serde(default = "d_last_session_limit")]
    pub limit: i64,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_limit_pinned() -> i64 {
    8
}
fn d_limit_recent() -> i64 {
    10
}
fn d_max_items() -> i64 {
    15
}
fn d_search_limit() -> i64 {
    8
}
fn d_snippet_chars() -> i64 {
    400
}
fn d_last_session_limit() -> i64 {
    3
}
fn d_workspace() -> String {
    "global".into()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lenient list parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Coerce a `*_json` argument into a list of strings.
///
/// Accepts a native JSON array or a JSON-encoded array string; missing,
/// unparseable, or wrong-typed values become `[]` rather than an error.
pub fn ensure_string_list(value: Option<&Value>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => collect_strings(items),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => collect_strings(&items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}
