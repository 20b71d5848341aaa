//! `mn-shaper` — pure content-shaping functions for the memory engine.
//!
//! Deterministic helpers with no I/O: compact-snippet generation, recency
//! decay, per-item relevance scoring, and the mode-driven content
//! selection used by bootstrap and search. The engine composes these; the
//! shaper never talks to the graph store.

pub mod compact;
pub mod scoring;
pub mod selection;

pub use compact::{compact, estimate_tokens, COMPACT_MAX_CHARS};
pub use scoring::{kind_weight, recency_weight, score, workspace_weight};
pub use selection::{select_content, BootstrapMode, ContentPrefer, HYBRID_FULL_MAX_CHARS};
