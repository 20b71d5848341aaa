//! Session commits and retrieval.
//!
//! A session is a point-in-time record of what happened in a workspace:
//! summary, decisions, next steps. Sessions are append-only and chained
//! per workspace via `FOLLOWS`, newest first.

use mn_domain::error::Result;
use mn_graph::SessionRow;

use crate::bootstrap::normalise_workspace;
use crate::tenant::RequestContext;
use crate::types::{json_list, Ack, SessionRecord};
use crate::write::now_timestamp;
use crate::MemoryEngine;

impl MemoryEngine {
    /// Write an end-of-session summary and chain it onto the workspace's
    /// previous session.
    pub async fn commit_session(
        &self,
        workspace_hint: &str,
        summary: &str,
        decisions: Vec<String>,
        next_steps: Vec<String>,
        ctx: Option<&RequestContext>,
    ) -> Result<Ack> {
        let workspace = normalise_workspace(workspace_hint);
        let summary = summary.trim();
        let space_id = self.write_space(ctx);
        let now = now_timestamp();

        self.gateway
            .create_session(
                &workspace,
                summary,
                &json_list(&decisions),
                &json_list(&next_steps),
                &now,
                space_id.as_deref(),
            )
            .await?;

        tracing::debug!(workspace = %workspace, "session committed");
        Ok(Ack { ok: true })
    }

    /// The most recent sessions of a workspace, newest first.
    pub async fn last_session(
        &self,
        workspace_hint: &str,
        limit: i64,
        ctx: Option<&RequestContext>,
    ) -> Result<Vec<SessionRecord>> {
        let workspace = normalise_workspace(workspace_hint);
        let limit = limit.clamp(1, 10);
        let spaces = self.read_spaces(ctx);

        let rows = self
            .gateway
            .recent_sessions(&workspace, spaces.as_deref(), limit)
            .await?;
        Ok(rows.into_iter().map(materialise_session).collect())
    }
}

/// Turn a stored row back into the wire record, materialising the
/// JSON-serialised lists.
fn materialise_session(row: SessionRow) -> SessionRecord {
    SessionRecord {
        id: row.id,
        created_at: row.created_at,
        workspace_hint: row.workspace_hint,
        summary: row.summary,
        decisions: parse_string_list(&row.decisions),
        next_steps: parse_string_list(&row.next_steps),
    }
}

/// Lenient JSON list parse; malformed stored data becomes an empty list
/// rather than an error.
fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materialises_stored_lists() {
        let record = materialise_session(SessionRow {
            id: "4:x:1".into(),
            created_at: "2025-06-01T00:00:00+00:00".into(),
            workspace_hint: "ws".into(),
            summary: "did things".into(),
            decisions: r#"["use rust"]"#.into(),
            next_steps: r#"["ship it","test it"]"#.into(),
        });
        assert_eq!(record.decisions, vec!["use rust"]);
        assert_eq!(record.next_steps, vec!["ship it", "test it"]);
    }

    #[test]
    fn malformed_lists_become_empty() {
        assert!(parse_string_list("not json").is_empty());
        assert!(parse_string_list("").is_empty());
        assert!(parse_string_list("{\"a\":1}").is_empty());
    }
}
