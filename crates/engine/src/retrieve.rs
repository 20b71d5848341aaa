//! The retrieval path: single-item read and ranked search.

use mn_domain::error::Result;
use mn_graph::ItemRow;
use mn_shaper::{compact, ContentPrefer, COMPACT_MAX_CHARS};

use crate::tenant::RequestContext;
use crate::types::{json_list, MemoryRecord, SearchResult};
use crate::MemoryEngine;

/// Default snippet size for search results without a stored compact form.
pub const DEFAULT_SNIPPET_CHARS: i64 = 400;

impl MemoryEngine {
    /// Look up one item by its opaque id.
    ///
    /// Returns `None` when the id is unknown — or, in multi-tenant mode,
    /// when the item lives in a space the caller may not read; the two
    /// cases are indistinguishable on purpose.
    pub async fn read_memory(
        &self,
        id: &str,
        prefer: ContentPrefer,
        ctx: Option<&RequestContext>,
    ) -> Result<Option<MemoryRecord>> {
        let spaces = self.read_spaces(ctx);
        let Some(row) = self.gateway.fetch_item(id, spaces.as_deref()).await? else {
            return Ok(None);
        };

        let content = match prefer {
            ContentPrefer::Full => row.content.clone(),
            ContentPrefer::Compact => compact_form(&row),
        };

        Ok(Some(MemoryRecord {
            id: row.id,
            kind: row.kind,
            title: row.title,
            content,
            content_compact: row.content_compact,
            content_full: row.content,
            tags: row.tags,
            pinned: row.pinned,
            created_at: row.created_at,
            updated_at: row.updated_at,
            workspace_hint: row.workspace_hint,
            importance: row.importance,
            source: row.source,
        }))
    }

    /// Full-text search, falling back to substring matching when the
    /// full-text index is unusable. The result shape is identical on both
    /// paths; only the ranking degrades.
    pub async fn search_memory(
        &self,
        query: &str,
        limit: i64,
        prefer: ContentPrefer,
        snippet_chars: i64,
        ctx: Option<&RequestContext>,
    ) -> Result<Vec<SearchResult>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let limit = limit.clamp(1, 25);
        let snippet_chars = if snippet_chars > 0 {
            snippet_chars as usize
        } else {
            DEFAULT_SNIPPET_CHARS as usize
        };
        let spaces = self.read_spaces(ctx);

        let rows = match self
            .gateway
            .fulltext_search(trimmed, spaces.as_deref(), limit)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "full-text search failed, falling back to substring match");
                self.gateway
                    .substring_search(trimmed, spaces.as_deref(), limit)
                    .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| shape_search_result(row, prefer, snippet_chars))
            .collect())
    }
}

/// The stored compact form, or an on-the-fly snippet for legacy items
/// written before compaction existed.
fn compact_form(row: &ItemRow) -> String {
    if !row.content_compact.is_empty() {
        row.content_compact.clone()
    } else {
        compact(&row.content, COMPACT_MAX_CHARS)
    }
}

fn shape_search_result(row: ItemRow, prefer: ContentPrefer, snippet_chars: usize) -> SearchResult {
    let shaped = match prefer {
        ContentPrefer::Full => row.content.clone(),
        ContentPrefer::Compact => {
            if !row.content_compact.is_empty() {
                row.content_compact.clone()
            } else {
                compact(&row.content, snippet_chars)
            }
        }
    };
    let has_full = !row.content.is_empty() && shaped != row.content;

    SearchResult {
        id: row.id,
        kind: row.kind,
        title: row.title,
        content: shaped,
        tags: json_list(&row.tags),
        pinned: row.pinned as u8,
        updated_at: row.updated_at,
        has_full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mn_shaper::ContentPrefer;

    fn row(content: &str, content_compact: &str) -> ItemRow {
        ItemRow {
            id: "4:abc:1".into(),
            kind: "note".into(),
            title: "t".into(),
            content: content.into(),
            content_compact: content_compact.into(),
            tags: vec!["a".into()],
            pinned: true,
            created_at: "2025-01-01T00:00:00+00:00".into(),
            updated_at: "2025-01-02T00:00:00+00:00".into(),
            workspace_hint: None,
            importance: 50,
            source: Some("agent".into()),
        }
    }

    #[test]
    fn full_prefer_ships_body_and_no_has_full() {
        let out = shape_search_result(row("body", "short"), ContentPrefer::Full, 400);
        assert_eq!(out.content, "body");
        assert!(!out.has_full);
        assert_eq!(out.pinned, 1);
        assert_eq!(out.tags, r#"["a"]"#);
    }

    #[test]
    fn compact_prefer_advertises_fuller_body() {
        let out = shape_search_result(row("a long body", "short"), ContentPrefer::Compact, 400);
        assert_eq!(out.content, "short");
        assert!(out.has_full);
    }

    #[test]
    fn snippet_chars_bounds_generated_snippets() {
        let long = "x".repeat(1000);
        let out = shape_search_result(row(&long, ""), ContentPrefer::Compact, 100);
        assert!(out.content.chars().count() <= 101);
        assert!(out.has_full);
    }

    #[test]
    fn empty_content_never_has_full() {
        let out = shape_search_result(row("", ""), ContentPrefer::Compact, 400);
        assert_eq!(out.content, "");
        assert!(!out.has_full);
    }
}
