//! `mn-graph` — the gateway to the backing Neo4j store.
//!
//! Owns the single driver/pool shared read-only across requests, installs
//! the schema on startup, and exposes typed query helpers for the memory
//! engine. No business logic lives here: normalisation, ranking and
//! budgeting all happen above this crate.
//!
//! Every helper checks a connection out of the driver pool, runs one
//! auto-commit transaction, and releases it before returning, so requests
//! never share a session.

pub mod rows;
mod schema;

pub use rows::{DedupKey, ItemFields, ItemRow, SessionRow, UpsertOutcome};

use mn_domain::config::StoreConfig;
use mn_domain::error::{Error, Result};
use neo4rs::{query, ConfigBuilder, Graph, Query};

use crate::rows::ITEM_PROJECTION;
use crate::schema::{FULLTEXT_STATEMENT, SCHEMA_STATEMENTS};

/// Connection handle plus schema state for the graph store.
#[derive(Clone)]
pub struct GraphGateway {
    graph: Graph,
}

impl GraphGateway {
    /// Connect, probe, and install the schema.
    ///
    /// A failed probe aborts startup with [`Error::StoreUnavailable`];
    /// full-text index creation failure is demoted to a warning because
    /// retrieval can fall back to substring matching.
    pub async fn connect(cfg: &StoreConfig) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(&cfg.uri)
            .user(&cfg.user)
            .password(&cfg.password)
            .db(cfg.database.as_str())
            .build()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        let gateway = Self { graph };
        gateway.probe().await?;
        gateway.install_schema().await?;
        tracing::info!(uri = %cfg.uri, database = %cfg.database, "graph store ready");
        Ok(gateway)
    }

    /// Trivial connectivity check (`RETURN 1`).
    pub async fn probe(&self) -> Result<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))
    }

    async fn install_schema(&self) -> Result<()> {
        for statement in SCHEMA_STATEMENTS {
            self.graph.run(query(statement)).await?;
        }
        if let Err(e) = self.graph.run(query(FULLTEXT_STATEMENT)).await {
            // Might already exist with a different field set; search will
            // fall back to substring matching if queries against it fail.
            tracing::warn!(error = %e, "full-text index creation failed");
        }
        Ok(())
    }

    // ── writes ───────────────────────────────────────────────────────

    /// Upsert one MemoryItem by its dedup key.
    ///
    /// `created_at` is written only on first insert; every write refreshes
    /// `updated_at` and the mutable fields. The returned action is
    /// `created` iff `created_at` equals this write's timestamp.
    pub async fn upsert_item(
        &self,
        key: &DedupKey,
        fields: &ItemFields,
        now: &str,
    ) -> Result<UpsertOutcome> {
        let cypher = match &key.space_id {
            Some(_) => {
                "MERGE (s:Space {id: $space_id}) \
                 MERGE (m:MemoryItem {space_id: $space_id, kind: $kind, title: $title}) \
                 ON CREATE SET m.created_at = $now \
                 SET m.content = $content, \
                     m.content_compact = $content_compact, \
                     m.updated_at = $now, \
                     m.pinned = $pinned, \
                     m.workspace_hint = \
                         CASE WHEN $workspace_hint = '' THEN null ELSE $workspace_hint END, \
                     m.importance = $importance, \
                     m.source = $source \
                 WITH s, m, \
                      CASE WHEN m.created_at = $now THEN 'created' ELSE 'updated' END AS action \
                 MERGE (s)-[:CONTAINS]->(m) \
                 RETURN elementId(m) AS id, action"
            }
            None => {
                "MERGE (m:MemoryItem {kind: $kind, title: $title}) \
                 ON CREATE SET m.created_at = $now \
                 SET m.content = $content, \
                     m.content_compact = $content_compact, \
                     m.updated_at = $now, \
                     m.pinned = $pinned, \
                     m.workspace_hint = \
                         CASE WHEN $workspace_hint = '' THEN null ELSE $workspace_hint END, \
                     m.importance = $importance, \
                     m.source = $source \
                 WITH m, \
                      CASE WHEN m.created_at = $now THEN 'created' ELSE 'updated' END AS action \
                 RETURN elementId(m) AS id, action"
            }
        };

        let mut q = query(cypher)
            .param("kind", key.kind.as_str())
            .param("title", key.title.as_str())
            .param("content", fields.content.as_str())
            .param("content_compact", fields.content_compact.as_str())
            .param("now", now)
            .param("pinned", fields.pinned)
            .param(
                "workspace_hint",
                fields.workspace_hint.as_deref().unwrap_or(""),
            )
            .param("importance", fields.importance)
            .param("source", fields.source.as_str());
        if let Some(space_id) = &key.space_id {
            q = q.param("space_id", space_id.as_str());
        }

        let mut stream = self.graph.execute(q).await?;
        let row = stream
            .next()
            .await?
            .ok_or_else(|| Error::StoreUnavailable("upsert returned no row".into()))?;
        Ok(UpsertOutcome {
            id: row.get("id")?,
            action: row.get("action")?,
        })
    }

    /// Replace the outgoing tag edges of an item with the given set.
    ///
    /// Runs after the upsert; an interruption between the two leaves a
    /// valid item with stale tags, which the next write converges.
    pub async fn replace_tags(&self, id: &str, tags: &[String]) -> Result<()> {
        self.graph
            .run(
                query(
                    "MATCH (m:MemoryItem)-[r:TAGGED_WITH]->() \
                     WHERE elementId(m) = $id DELETE r",
                )
                .param("id", id),
            )
            .await?;

        if tags.is_empty() {
            return Ok(());
        }
        self.graph
            .run(
                query(
                    "MATCH (m:MemoryItem) WHERE elementId(m) = $id \
                     UNWIND $tags AS tag \
                     MERGE (t:Tag {name: tag}) \
                     MERGE (m)-[:TAGGED_WITH]->(t)",
                )
                .param("id", id)
                .param("tags", tags.to_vec()),
            )
            .await?;
        Ok(())
    }

    /// Create one Session node, link it to its workspace (and space), and
    /// chain it onto the most recent prior session via `FOLLOWS`.
    pub async fn create_session(
        &self,
        workspace: &str,
        summary: &str,
        decisions_json: &str,
        next_steps_json: &str,
        now: &str,
        space_id: Option<&str>,
    ) -> Result<()> {
        let cypher = match space_id {
            Some(_) => {
                "MERGE (w:Workspace {name: $workspace}) \
                 MERGE (sp:Space {id: $space_id}) \
                 CREATE (s:Session { \
                     workspace_hint: $workspace, \
                     summary: $summary, \
                     decisions: $decisions, \
                     next_steps: $next_steps, \
                     created_at: $now, \
                     space_id: $space_id \
                 }) \
                 CREATE (s)-[:IN_WORKSPACE]->(w) \
                 CREATE (s)-[:IN_SPACE]->(sp) \
                 WITH s, w \
                 OPTIONAL MATCH (prev:Session)-[:IN_WORKSPACE]->(w) \
                 WHERE prev <> s AND prev.space_id = $space_id \
                 WITH s, prev \
                 ORDER BY prev.created_at DESC \
                 LIMIT 1 \
                 FOREACH (_ IN CASE WHEN prev IS NOT NULL THEN [1] ELSE [] END | \
                     CREATE (s)-[:FOLLOWS]->(prev) \
                 )"
            }
            None => {
                "MERGE (w:Workspace {name: $workspace}) \
                 CREATE (s:Session { \
                     workspace_hint: $workspace, \
                     summary: $summary, \
                     decisions: $decisions, \
                     next_steps: $next_steps, \
                     created_at: $now \
                 }) \
                 CREATE (s)-[:IN_WORKSPACE]->(w) \
                 WITH s, w \
                 OPTIONAL MATCH (prev:Session)-[:IN_WORKSPACE]->(w) \
                 WHERE prev <> s \
                 WITH s, prev \
                 ORDER BY prev.created_at DESC \
                 LIMIT 1 \
                 FOREACH (_ IN CASE WHEN prev IS NOT NULL THEN [1] ELSE [] END | \
                     CREATE (s)-[:FOLLOWS]->(prev) \
                 )"
            }
        };

        let mut q = query(cypher)
            .param("workspace", workspace)
            .param("summary", summary)
            .param("decisions", decisions_json)
            .param("next_steps", next_steps_json)
            .param("now", now);
        if let Some(space_id) = space_id {
            q = q.param("space_id", space_id);
        }
        self.graph.run(q).await?;
        Ok(())
    }

    // ── reads ────────────────────────────────────────────────────────

    /// Look up one item by its store-assigned id. `spaces` restricts the
    /// lookup to the caller's allowed spaces in multi-tenant mode.
    pub async fn fetch_item(
        &self,
        id: &str,
        spaces: Option<&[String]>,
    ) -> Result<Option<ItemRow>> {
        let cypher = format!(
            "MATCH (m:MemoryItem) \
             WHERE elementId(m) = $id{space_filter} \
             OPTIONAL MATCH (m)-[:TAGGED_WITH]->(t:Tag) \
             WITH m, collect(t.name) AS tags \
             RETURN {ITEM_PROJECTION}",
            space_filter = space_filter(spaces, " AND m.space_id IN $spaces"),
        );

        let mut q = query(&cypher).param("id", id);
        if let Some(spaces) = spaces {
            q = q.param("spaces", spaces.to_vec());
        }

        let mut stream = self.graph.execute(q).await?;
        match stream.next().await? {
            Some(row) => Ok(Some(ItemRow::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Primary search path: the `memory_fulltext` index, ordered by the
    /// store-provided relevance score.
    pub async fn fulltext_search(
        &self,
        text: &str,
        spaces: Option<&[String]>,
        limit: i64,
    ) -> Result<Vec<ItemRow>> {
        let cypher = format!(
            "CALL db.index.fulltext.queryNodes('memory_fulltext', $search_text) \
             YIELD node, score \
             {space_filter}\
             WITH node AS m, score \
             OPTIONAL MATCH (m)-[:TAGGED_WITH]->(t:Tag) \
             WITH m, score, collect(t.name) AS tags \
             RETURN {ITEM_PROJECTION}, score \
             ORDER BY score DESC \
             LIMIT $lim",
            space_filter = space_filter(spaces, "WHERE node.space_id IN $spaces "),
        );

        let mut q = query(&cypher).param("search_text", text).param("lim", limit);
        if let Some(spaces) = spaces {
            q = q.param("spaces", spaces.to_vec());
        }
        self.collect_items(q).await
    }

    /// Fallback search path: case-insensitive substring match on title or
    /// content, most recently updated first.
    pub async fn substring_search(
        &self,
        text: &str,
        spaces: Option<&[String]>,
        limit: i64,
    ) -> Result<Vec<ItemRow>> {
        let cypher = format!(
            "MATCH (m:MemoryItem) \
             WHERE (toLower(m.title) CONTAINS toLower($search_text) \
                OR toLower(m.content) CONTAINS toLower($search_text)){space_filter} \
             OPTIONAL MATCH (m)-[:TAGGED_WITH]->(t:Tag) \
             WITH m, collect(t.name) AS tags \
             RETURN {ITEM_PROJECTION} \
             ORDER BY m.updated_at DESC \
             LIMIT $lim",
            space_filter = space_filter(spaces, " AND m.space_id IN $spaces"),
        );

        let mut q = query(&cypher).param("search_text", text).param("lim", limit);
        if let Some(spaces) = spaces {
            q = q.param("spaces", spaces.to_vec());
        }
        self.collect_items(q).await
    }

    /// Pinned items, most recently updated first.
    pub async fn pinned_items(
        &self,
        spaces: Option<&[String]>,
        limit: i64,
    ) -> Result<Vec<ItemRow>> {
        let cypher = format!(
            "MATCH (m:MemoryItem) \
             WHERE m.pinned = true{space_filter} \
             OPTIONAL MATCH (m)-[:TAGGED_WITH]->(t:Tag) \
             WITH m, collect(t.name) AS tags \
             RETURN {ITEM_PROJECTION} \
             ORDER BY m.updated_at DESC \
             LIMIT $lim",
            space_filter = space_filter(spaces, " AND m.space_id IN $spaces"),
        );

        let mut q = query(&cypher).param("lim", limit);
        if let Some(spaces) = spaces {
            q = q.param("spaces", spaces.to_vec());
        }
        self.collect_items(q).await
    }

    /// Most recently updated items, pinned or not.
    pub async fn recent_items(
        &self,
        spaces: Option<&[String]>,
        limit: i64,
    ) -> Result<Vec<ItemRow>> {
        let cypher = format!(
            "MATCH (m:MemoryItem) \
             {space_filter}\
             OPTIONAL MATCH (m)-[:TAGGED_WITH]->(t:Tag) \
             WITH m, collect(t.name) AS tags \
             RETURN {ITEM_PROJECTION} \
             ORDER BY m.updated_at DESC \
             LIMIT $lim",
            space_filter = space_filter(spaces, "WHERE m.space_id IN $spaces "),
        );

        let mut q = query(&cypher).param("lim", limit);
        if let Some(spaces) = spaces {
            q = q.param("spaces", spaces.to_vec());
        }
        self.collect_items(q).await
    }

    /// Sessions of one workspace, newest first.
    pub async fn recent_sessions(
        &self,
        workspace: &str,
        spaces: Option<&[String]>,
        limit: i64,
    ) -> Result<Vec<SessionRow>> {
        let cypher = format!(
            "MATCH (s:Session {{workspace_hint: $workspace}}) \
             {space_filter}\
             RETURN elementId(s) AS id, \
                    s.created_at AS created_at, \
                    s.workspace_hint AS workspace_hint, \
                    s.summary AS summary, \
                    s.decisions AS decisions, \
                    s.next_steps AS next_steps \
             ORDER BY s.created_at DESC \
             LIMIT $lim",
            space_filter = space_filter(spaces, "WHERE s.space_id IN $spaces "),
        );

        let mut q = query(&cypher).param("workspace", workspace).param("lim", limit);
        if let Some(spaces) = spaces {
            q = q.param("spaces", spaces.to_vec());
        }

        let mut stream = self.graph.execute(q).await?;
        let mut sessions = Vec::new();
        while let Some(row) = stream.next().await? {
            sessions.push(SessionRow::from_row(&row)?);
        }
        Ok(sessions)
    }

    // ── internals ────────────────────────────────────────────────────

    async fn collect_items(&self, q: Query) -> Result<Vec<ItemRow>> {
        let mut stream = self.graph.execute(q).await?;
        let mut items = Vec::new();
        while let Some(row) = stream.next().await? {
            items.push(ItemRow::from_row(&row)?);
        }
        Ok(items)
    }
}

/// The space-filter fragment, or nothing in single-tenant mode.
fn space_filter(spaces: Option<&[String]>, fragment: &'static str) -> &'static str {
    if spaces.is_some() {
        fragment
    } else {
        ""
    }
}
