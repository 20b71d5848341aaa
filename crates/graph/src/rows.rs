//! Typed records returned by the gateway's query helpers.

use mn_domain::error::Result;
use neo4rs::Row;

/// One MemoryItem node with its collected tag names.
///
/// Properties written by older engine versions may be absent on a node;
/// decoding is defensive so a legacy item never poisons a result set.
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub content_compact: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
    pub workspace_hint: Option<String>,
    pub importance: i64,
    pub source: Option<String>,
}

/// The shared projection all item queries return.
pub(crate) const ITEM_PROJECTION: &str = "elementId(m) AS id, \
     m.kind AS kind, \
     m.title AS title, \
     m.content AS content, \
     m.content_compact AS content_compact, \
     tags, \
     m.pinned AS pinned, \
     m.created_at AS created_at, \
     m.updated_at AS updated_at, \
     m.workspace_hint AS workspace_hint, \
     m.importance AS importance, \
     m.source AS source";

impl ItemRow {
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            kind: row.get::<Option<String>>("kind")?.unwrap_or_default(),
            title: row.get::<Option<String>>("title")?.unwrap_or_default(),
            content: row.get::<Option<String>>("content")?.unwrap_or_default(),
            content_compact: row
                .get::<Option<String>>("content_compact")?
                .unwrap_or_default(),
            tags: row.get("tags")?,
            pinned: row.get::<Option<bool>>("pinned")?.unwrap_or(false),
            created_at: row.get::<Option<String>>("created_at")?.unwrap_or_default(),
            updated_at: row.get::<Option<String>>("updated_at")?.unwrap_or_default(),
            workspace_hint: row.get("workspace_hint")?,
            importance: row.get::<Option<i64>>("importance")?.unwrap_or(50),
            source: row.get("source")?,
        })
    }
}

/// One Session node. `decisions` and `next_steps` stay in their stored
/// JSON-serialised form; materialising them back into lists is the
/// engine's job.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub id: String,
    pub created_at: String,
    pub workspace_hint: String,
    pub summary: String,
    pub decisions: String,
    pub next_steps: String,
}

impl SessionRow {
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            created_at: row.get::<Option<String>>("created_at")?.unwrap_or_default(),
            workspace_hint: row
                .get::<Option<String>>("workspace_hint")?
                .unwrap_or_default(),
            summary: row.get::<Option<String>>("summary")?.unwrap_or_default(),
            decisions: row.get::<Option<String>>("decisions")?.unwrap_or_default(),
            next_steps: row.get::<Option<String>>("next_steps")?.unwrap_or_default(),
        })
    }
}

/// The dedup identity of a MemoryItem. `space_id` is `None` in
/// single-tenant mode.
#[derive(Debug, Clone)]
pub struct DedupKey {
    pub space_id: Option<String>,
    pub kind: String,
    pub title: String,
}

/// The mutable properties written on every upsert.
#[derive(Debug, Clone)]
pub struct ItemFields {
    pub content: String,
    pub content_compact: String,
    pub pinned: bool,
    pub workspace_hint: Option<String>,
    pub importance: i64,
    pub source: String,
}

/// Result of an upsert: the store-assigned id and whether the node was
/// created or updated.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub id: String,
    pub action: String,
}
