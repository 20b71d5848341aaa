//! Startup-context assembly: pinned + ranked recent items under a
//! character budget.
//!
//! Pinned items are included unconditionally, up to `max_items` and
//! exempt from the budget. The recent set is over-fetched, scored, and
//! packed greedily: an item that would overflow the budget is skipped, not
//! terminal, since a smaller item further down the ranking may still fit.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use mn_domain::error::Result;
use mn_graph::ItemRow;
use mn_shaper::{estimate_tokens, score, select_content, BootstrapMode};

use crate::tenant::RequestContext;
use crate::types::{json_list, BootstrapItem, BootstrapRequest, BootstrapResult};
use crate::MemoryEngine;

impl MemoryEngine {
    /// Build the startup context for an agent session.
    pub async fn bootstrap(
        &self,
        req: BootstrapRequest,
        ctx: Option<&RequestContext>,
    ) -> Result<BootstrapResult> {
        let limit_pinned = req.limit_pinned.clamp(0, 25);
        let limit_recent = req.limit_recent.clamp(0, 50);
        let max_items = req.max_items.clamp(1, 50);
        let workspace_hint = normalise_workspace(&req.workspace_hint);
        let spaces = self.read_spaces(ctx);

        let pinned_rows = if limit_pinned > 0 {
            self.gateway
                .pinned_items(spaces.as_deref(), limit_pinned)
                .await?
        } else {
            Vec::new()
        };

        // Over-fetch so that scoring has candidates to choose from even
        // after pinned dedup and budget skips.
        let recent_rows = if limit_recent > 0 {
            let overfetch = (limit_recent * 3).max(max_items * 2);
            self.gateway
                .recent_items(spaces.as_deref(), overfetch)
                .await?
        } else {
            Vec::new()
        };

        let opts = AssembleOptions {
            workspace_hint: workspace_hint.clone(),
            mode: req.mode,
            max_tokens: req.max_tokens,
            max_items: max_items as usize,
            limit_recent: limit_recent as usize,
        };
        let mut result = assemble(pinned_rows, recent_rows, &opts, Utc::now());

        if req.include_sessions {
            let sessions = self.last_session(&workspace_hint, 1, ctx).await?;
            result.last_session = Some(sessions.into_iter().next());
        }

        let approx_tokens: usize = result
            .pinned
            .iter()
            .chain(result.recent.iter())
            .map(|item| estimate_tokens(&item.content) + estimate_tokens(&item.title))
            .sum();
        tracing::debug!(
            pinned = result.pinned.len(),
            recent = result.recent.len(),
            approx_tokens,
            workspace = %workspace_hint,
            "bootstrap assembled"
        );
        Ok(result)
    }
}

pub(crate) fn normalise_workspace(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "global".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Clamped, normalised bootstrap parameters.
pub(crate) struct AssembleOptions {
    pub workspace_hint: String,
    pub mode: BootstrapMode,
    pub max_tokens: i64,
    pub max_items: usize,
    pub limit_recent: usize,
}

/// Rank, shape, and budget the fetched rows. Pure — all store access has
/// already happened.
pub(crate) fn assemble(
    pinned_rows: Vec<ItemRow>,
    recent_rows: Vec<ItemRow>,
    opts: &AssembleOptions,
    now: DateTime<Utc>,
) -> BootstrapResult {
    let mut pinned = Vec::new();
    let mut pinned_ids = HashSet::new();
    for row in pinned_rows.into_iter().take(opts.max_items) {
        pinned_ids.insert(row.id.clone());
        pinned.push(shape_item(row, opts.mode));
    }

    let mut candidates: Vec<(f64, ItemRow)> = recent_rows
        .into_iter()
        .filter(|row| !pinned_ids.contains(&row.id))
        .map(|row| {
            let s = score(
                &row.kind,
                &row.updated_at,
                row.importance,
                row.workspace_hint.as_deref(),
                &opts.workspace_hint,
                now,
            );
            (s, row)
        })
        .collect();
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

    let budget = (opts.max_tokens > 0).then(|| opts.max_tokens as usize * 4);
    let slots = opts
        .max_items
        .saturating_sub(pinned.len())
        .min(opts.limit_recent);

    let mut recent = Vec::new();
    let mut used = 0usize;
    for (_, row) in candidates {
        if recent.len() >= slots {
            break;
        }
        let item = shape_item(row, opts.mode);
        let cost = item.content.chars().count() + item.title.chars().count();
        if let Some(cap) = budget {
            if used + cost > cap {
                continue;
            }
        }
        used += cost;
        recent.push(item);
    }

    BootstrapResult {
        pinned,
        recent,
        last_session: None,
    }
}

fn shape_item(row: ItemRow, mode: BootstrapMode) -> BootstrapItem {
    let shaped = select_content(&row.kind, &row.content, &row.content_compact, mode);
    let has_full = !row.content.is_empty() && shaped != row.content;
    BootstrapItem {
        id: row.id,
        kind: row.kind,
        title: row.title,
        content: shaped,
        tags: json_list(&row.tags),
        updated_at: row.updated_at,
        has_full,
    }
}
