//! `mn-engine` — the memory engine.
//!
//! Owns the write/read/search/bootstrap/session operations, the data-model
//! invariants, and the ranking and budgeting policy. Graph access goes
//! through [`mn_graph::GraphGateway`]; content shaping through
//! [`mn_shaper`]. The engine itself holds no mutable state, so one
//! instance serves any number of concurrent requests.

pub mod bootstrap;
pub mod retrieve;
pub mod sessions;
pub mod tenant;
pub mod types;
pub mod write;

pub use tenant::{resolve_space, RequestContext, SpaceScope};
pub use types::{
    Ack, BootstrapItem, BootstrapRequest, BootstrapResult, MemoryRecord, SearchResult,
    SessionRecord, WriteMemory, WriteOutcome,
};

use std::sync::Arc;

use mn_graph::GraphGateway;

/// The memory service engine.
#[derive(Clone)]
pub struct MemoryEngine {
    gateway: Arc<GraphGateway>,
    multi_tenant: bool,
}

impl MemoryEngine {
    pub fn new(gateway: Arc<GraphGateway>, multi_tenant: bool) -> Self {
        Self {
            gateway,
            multi_tenant,
        }
    }

    pub fn multi_tenant(&self) -> bool {
        self.multi_tenant
    }

    /// The effective space id for a write, or `None` in single-tenant mode.
    pub(crate) fn write_space(&self, ctx: Option<&RequestContext>) -> Option<String> {
        self.multi_tenant.then(|| resolve_space(ctx).space_id)
    }

    /// The allowed-space filter for a read, or `None` in single-tenant mode.
    pub(crate) fn read_spaces(&self, ctx: Option<&RequestContext>) -> Option<Vec<String>> {
        self.multi_tenant.then(|| resolve_space(ctx).allowed)
    }
}
