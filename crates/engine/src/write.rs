//! The write path: normalisation, dedup upsert, tag reconciliation.

use chrono::{SecondsFormat, Utc};
use mn_domain::error::Result;
use mn_graph::{DedupKey, ItemFields};
use mn_shaper::{compact, COMPACT_MAX_CHARS};

use crate::tenant::RequestContext;
use crate::types::{WriteMemory, WriteOutcome};
use crate::MemoryEngine;

/// The semantic classes a memory item may carry. Anything else is stored
/// as a plain note rather than rejected.
pub const VALID_KINDS: [&str; 5] = ["answer", "decision", "pattern", "command", "note"];

impl MemoryEngine {
    /// Store one memory item, deduplicating by `(kind, title)` — scoped to
    /// the caller's space in multi-tenant mode.
    ///
    /// The upsert and the tag reconciliation run as separate store
    /// transactions in that order; an interruption between them leaves a
    /// valid item with stale tags, which the next write converges.
    pub async fn write_memory(
        &self,
        req: WriteMemory,
        ctx: Option<&RequestContext>,
    ) -> Result<WriteOutcome> {
        let kind = normalise_kind(&req.kind);
        let title = req.title.trim().to_string();
        let content = req.content.trim().to_string();
        let tags: Vec<String> = req
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let content_compact = match req
            .content_compact
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
        {
            Some(provided) => provided,
            None => compact(&content, COMPACT_MAX_CHARS),
        };

        let key = DedupKey {
            space_id: self.write_space(ctx),
            kind,
            title,
        };
        let fields = ItemFields {
            content,
            content_compact,
            pinned: req.pinned,
            workspace_hint: req
                .workspace_hint
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty()),
            importance: req.importance.unwrap_or(50).clamp(0, 100),
            source: req
                .source
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "agent".into()),
        };

        let now = now_timestamp();
        let outcome = self.gateway.upsert_item(&key, &fields, &now).await?;
        self.gateway.replace_tags(&outcome.id, &tags).await?;

        tracing::debug!(
            id = %outcome.id,
            action = %outcome.action,
            kind = %key.kind,
            tags = tags.len(),
            "memory written"
        );

        Ok(WriteOutcome {
            ok: true,
            action: outcome.action,
            id: outcome.id,
        })
    }
}

/// Lowercase and validate a kind, coercing anything unrecognised to
/// `note`.
pub(crate) fn normalise_kind(raw: &str) -> String {
    let kind = raw.trim().to_lowercase();
    if VALID_KINDS.contains(&kind.as_str()) {
        kind
    } else {
        "note".to_string()
    }
}

/// Current UTC time in the stored timestamp format. Microsecond precision
/// with a fixed-width offset keeps lexicographic and chronological order
/// identical.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
