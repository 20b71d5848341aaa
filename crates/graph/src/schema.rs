//! Schema installation statements.
//!
//! All statements are `IF NOT EXISTS` so startup is idempotent against an
//! already-provisioned database. The full-text index is kept separate: its
//! creation failure is survivable (retrieval falls back to substring
//! matching), whereas the plain indices and constraints are not expected
//! to fail on any supported Neo4j version.

/// Secondary indices and uniqueness constraints, applied in order.
pub(crate) const SCHEMA_STATEMENTS: &[&str] = &[
    // Dedup lookups by (kind, title).
    "CREATE INDEX memory_item_kind_title IF NOT EXISTS \
     FOR (m:MemoryItem) ON (m.kind, m.title)",
    // Pinned scans for bootstrap.
    "CREATE INDEX memory_item_pinned IF NOT EXISTS \
     FOR (m:MemoryItem) ON (m.pinned)",
    // Recency ordering.
    "CREATE INDEX memory_item_updated IF NOT EXISTS \
     FOR (m:MemoryItem) ON (m.updated_at)",
    // Workspace-affinity lookups.
    "CREATE INDEX memory_item_workspace IF NOT EXISTS \
     FOR (m:MemoryItem) ON (m.workspace_hint)",
    // Per-space dedup by (space_id, kind, title).
    "CREATE INDEX memory_item_space_kind_title IF NOT EXISTS \
     FOR (m:MemoryItem) ON (m.space_id, m.kind, m.title)",
    "CREATE CONSTRAINT tag_name_unique IF NOT EXISTS \
     FOR (t:Tag) REQUIRE t.name IS UNIQUE",
    "CREATE CONSTRAINT workspace_name_unique IF NOT EXISTS \
     FOR (w:Workspace) REQUIRE w.name IS UNIQUE",
    "CREATE CONSTRAINT space_id_unique IF NOT EXISTS \
     FOR (s:Space) REQUIRE s.id IS UNIQUE",
    "CREATE INDEX session_created IF NOT EXISTS \
     FOR (s:Session) ON (s.created_at)",
    "CREATE INDEX session_workspace IF NOT EXISTS \
     FOR (s:Session) ON (s.workspace_hint)",
    "CREATE INDEX session_space IF NOT EXISTS \
     FOR (s:Session) ON (s.space_id)",
];

/// Full-text index powering the primary search path. The index name and
/// field set are part of the schema contract.
pub(crate) const FULLTEXT_STATEMENT: &str =
    "CREATE FULLTEXT INDEX memory_fulltext IF NOT EXISTS \
     FOR (m:MemoryItem) ON EACH [m.title, m.content, m.content_compact]";
