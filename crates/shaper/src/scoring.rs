//! Relevance scoring for bootstrap ranking.
//!
//! `score = kind_w × recency_w × (0.5 + importance/100) × workspace_w`
//!
//! Decisions outrank patterns outrank commands outrank answers; notes sit
//! at the bottom. Recency decays with a 14-day half-life. A workspace
//! match boosts, a mismatch demotes, and the `global` scope is neutral.

use chrono::{DateTime, Utc};

/// Half-life of the recency decay, in days.
const RECENCY_HALF_LIFE_DAYS: f64 = 14.0;

/// Ranking weight for a memory kind. Unrecognised kinds weigh like notes.
pub fn kind_weight(kind: &str) -> f64 {
    match kind {
        "decision" => 1.4,
        "pattern" => 1.3,
        "command" => 1.2,
        "answer" => 1.1,
        _ => 0.7,
    }
}

/// Exponential recency decay from `updated_at` to `now`.
///
/// An unparseable timestamp lands in the middle of the scale rather than
/// sinking the item entirely.
pub fn recency_weight(updated_at: &str, now: DateTime<Utc>) -> f64 {
    match DateTime::parse_from_rfc3339(updated_at) {
        Ok(t) => {
            let age_days = (now - t.with_timezone(&Utc)).num_seconds() as f64 / 86_400.0;
            0.5_f64.powf(age_days / RECENCY_HALF_LIFE_DAYS)
        }
        Err(_) => 0.5,
    }
}

/// Workspace affinity between the requesting scope and an item's hint.
///
/// * 1.2 — both set (request hint not `global`) and equal
/// * 0.8 — both set but different
/// * 1.0 — otherwise (global request, or the item carries no hint)
pub fn workspace_weight(request_hint: &str, item_hint: Option<&str>) -> f64 {
    if request_hint.is_empty() || request_hint == "global" {
        return 1.0;
    }
    match item_hint {
        Some(h) if !h.is_empty() => {
            if h == request_hint {
                1.2
            } else {
                0.8
            }
        }
        _ => 1.0,
    }
}

/// Combined relevance score of one item for a bootstrap request.
pub fn score(
    kind: &str,
    updated_at: &str,
    importance: i64,
    item_hint: Option<&str>,
    request_hint: &str,
    now: DateTime<Utc>,
) -> f64 {
    kind_weight(kind)
        * recency_weight(updated_at, now)
        * (0.5 + importance as f64 / 100.0)
        * workspace_weight(request_hint, item_hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn ts(days_ago: i64) -> String {
        (now() - chrono::Duration::days(days_ago)).to_rfc3339()
    }

    #[test]
    fn kind_weights_are_ordered() {
        assert!(kind_weight("decision") > kind_weight("pattern"));
        assert!(kind_weight("pattern") > kind_weight("command"));
        assert!(kind_weight("command") > kind_weight("answer"));
        assert!(kind_weight("answer") > kind_weight("note"));
        assert_eq!(kind_weight("bogus"), kind_weight("note"));
    }

    #[test]
    fn recency_halves_every_fourteen_days() {
        let fresh = recency_weight(&ts(0), now());
        let halved = recency_weight(&ts(14), now());
        assert!((fresh - 1.0).abs() < 1e-9);
        assert!((halved - 0.5).abs() < 1e-9);
    }

    #[test]
    fn newer_items_weigh_more() {
        assert!(recency_weight(&ts(1), now()) > recency_weight(&ts(30), now()));
    }

    #[test]
    fn unparseable_timestamp_is_midscale() {
        assert_eq!(recency_weight("not-a-date", now()), 0.5);
        assert_eq!(recency_weight("", now()), 0.5);
    }

    #[test]
    fn workspace_match_beats_mismatch() {
        assert_eq!(workspace_weight("proj", Some("proj")), 1.2);
        assert_eq!(workspace_weight("proj", Some("other")), 0.8);
        assert_eq!(workspace_weight("proj", None), 1.0);
        assert_eq!(workspace_weight("proj", Some("")), 1.0);
        assert_eq!(workspace_weight("global", Some("proj")), 1.0);
        assert_eq!(workspace_weight("", Some("proj")), 1.0);
    }

    #[test]
    fn higher_importance_scores_higher() {
        let lo = score("note", &ts(0), 10, None, "global", now());
        let hi = score("note", &ts(0), 90, None, "global", now());
        assert!(hi > lo);
    }

    #[test]
    fn more_recent_scores_higher() {
        let old = score("note", &ts(60), 50, None, "global", now());
        let new = score("note", &ts(1), 50, None, "global", now());
        assert!(new > old);
    }

    #[test]
    fn matching_workspace_never_scores_below_mismatch() {
        let matched = score("note", &ts(5), 50, Some("ws"), "ws", now());
        let mismatched = score("note", &ts(5), 50, Some("elsewhere"), "ws", now());
        assert!(matched >= mismatched);
    }
}
