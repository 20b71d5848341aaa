//! Tenant resolution.
//!
//! The request context carries unauthenticated identity hints; the
//! resolver derives the effective space id and the set of spaces the
//! caller may read. It never grants access beyond what the caller already
//! claimed — spaces are trust-on-caller, and authenticating the hints is
//! the transport's problem.

use serde::Deserialize;

/// Identity and scoping hints attached to a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    pub user_id: Option<String>,
    pub space_id: Option<String>,
    pub allowed_spaces: Option<Vec<String>>,
}

/// The resolved tenant scope of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceScope {
    /// Space that writes land in.
    pub space_id: String,
    /// Spaces that reads may see. Always contains at least `space_id`.
    pub allowed: Vec<String>,
}

/// Derive the tenant scope from an (optional) request context.
///
/// Precedence: explicit `space_id`, then `personal:<user_id>`, then the
/// shared `global` space. An absent or empty `allowed_spaces` collapses to
/// just the effective space.
pub fn resolve_space(ctx: Option<&RequestContext>) -> SpaceScope {
    let user_id = ctx
        .and_then(|c| c.user_id.as_deref())
        .unwrap_or("")
        .trim();
    let explicit = ctx
        .and_then(|c| c.space_id.as_deref())
        .unwrap_or("")
        .trim();

    let space_id = if !explicit.is_empty() {
        explicit.to_string()
    } else if !user_id.is_empty() {
        format!("personal:{user_id}")
    } else {
        "global".to_string()
    };

    let allowed = match ctx.and_then(|c| c.allowed_spaces.clone()) {
        Some(list) if !list.is_empty() => list,
        _ => vec![space_id.clone()],
    };

    SpaceScope { space_id, allowed }
}
