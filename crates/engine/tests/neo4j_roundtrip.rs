//! Integration tests against a live Neo4j instance.
//!
//! Ignored by default; run with a reachable store:
//!
//! ```sh
//! NEO4J_URI=bolt://localhost:7687 cargo test -p mn-engine -- --ignored
//! ```

use std::sync::Arc;

use mn_domain::config::StoreConfig;
use mn_engine::{BootstrapRequest, MemoryEngine, WriteMemory};
use mn_graph::GraphGateway;
use mn_shaper::{BootstrapMode, ContentPrefer};

async fn engine() -> MemoryEngine {
    let cfg = StoreConfig::from_env();
    let gateway = GraphGateway::connect(&cfg)
        .await
        .expect("Neo4j must be reachable for ignored tests");
    MemoryEngine::new(Arc::new(gateway), false)
}

fn write(kind: &str, title: &str, content: &str) -> WriteMemory {
    WriteMemory {
        kind: kind.into(),
        title: title.into(),
        content: content.into(),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore]
async fn write_and_search_roundtrip() {
    let engine = engine().await;
    let outcome = engine
        .write_memory(
            WriteMemory {
                tags: vec!["graph".into(), "roundtrip".into()],
                pinned: true,
                ..write(
                    "decision",
                    "Engine Test: Graph Storage",
                    "Using a property graph for memory storage",
                )
            },
            None,
        )
        .await
        .unwrap();
    assert!(outcome.ok);

    let results = engine
        .search_memory("property graph memory", 5, ContentPrefer::Full, 400, None)
        .await
        .unwrap();
    assert!(results
        .iter()
        .any(|r| r.title == "Engine Test: Graph Storage"));
}

#[tokio::test]
#[ignore]
async fn second_write_with_same_key_updates() {
    let engine = engine().await;
    engine
        .write_memory(write("note", "Engine Test: Dedup", "Original content"), None)
        .await
        .unwrap();
    let second = engine
        .write_memory(write("note", "Engine Test: Dedup", "Updated content"), None)
        .await
        .unwrap();
    assert_eq!(second.action, "updated");

    let item = engine
        .read_memory(&second.id, ContentPrefer::Full, None)
        .await
        .unwrap()
        .expect("item must exist after write");
    assert_eq!(item.content, "Updated content");
}

#[tokio::test]
#[ignore]
async fn invalid_kind_is_stored_as_note() {
    let engine = engine().await;
    let outcome = engine
        .write_memory(
            write("invalid_kind_xyz", "Engine Test: Kind Coercion", "body"),
            None,
        )
        .await
        .unwrap();
    let item = engine
        .read_memory(&outcome.id, ContentPrefer::Full, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.kind, "note");
}

#[tokio::test]
#[ignore]
async fn auto_compact_is_generated_for_long_content() {
    let engine = engine().await;
    let long_content = "C".repeat(500);
    let outcome = engine
        .write_memory(
            write("decision", "Engine Test: Auto Compact", &long_content),
            None,
        )
        .await
        .unwrap();

    let item = engine
        .read_memory(&outcome.id, ContentPrefer::Compact, None)
        .await
        .unwrap()
        .unwrap();
    assert!(item.content.chars().count() < 500);
    assert!(item.content.ends_with('…'));
    assert_eq!(item.content_full, long_content);
}

#[tokio::test]
#[ignore]
async fn read_unknown_id_returns_none() {
    let engine = engine().await;
    let item = engine
        .read_memory(
            "4:xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx:999999",
            ContentPrefer::Full,
            None,
        )
        .await
        .unwrap();
    assert!(item.is_none());
}

#[tokio::test]
#[ignore]
async fn search_empty_query_returns_nothing() {
    let engine = engine().await;
    let results = engine
        .search_memory("   ", 5, ContentPrefer::Full, 400, None)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
#[ignore]
async fn tags_are_replaced_wholesale() {
    let engine = engine().await;
    engine
        .write_memory(
            WriteMemory {
                tags: vec!["one".into(), "two".into()],
                ..write("pattern", "Engine Test: Tag Replace", "body")
            },
            None,
        )
        .await
        .unwrap();
    let outcome = engine
        .write_memory(
            WriteMemory {
                tags: vec!["three".into()],
                ..write("pattern", "Engine Test: Tag Replace", "body")
            },
            None,
        )
        .await
        .unwrap();

    let item = engine
        .read_memory(&outcome.id, ContentPrefer::Full, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.tags, vec!["three"]);
}

#[tokio::test]
#[ignore]
async fn bootstrap_thin_mode_ships_compact_content() {
    let engine = engine().await;
    engine
        .write_memory(
            WriteMemory {
                content_compact: Some("Short thin test".into()),
                pinned: true,
                ..write("decision", "Engine Test: Thin Boot", &"Very long ".repeat(100))
            },
            None,
        )
        .await
        .unwrap();

    let result = engine
        .bootstrap(
            BootstrapRequest {
                mode: BootstrapMode::Thin,
                limit_pinned: 25,
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let found = result
        .pinned
        .iter()
        .find(|p| p.title == "Engine Test: Thin Boot")
        .expect("pinned item must appear in bootstrap");
    assert_eq!(found.content, "Short thin test");
    assert!(found.has_full);
}

#[tokio::test]
#[ignore]
async fn commit_session_then_last_session() {
    let engine = engine().await;
    engine
        .commit_session(
            "engine-test-ws",
            "First test session",
            vec!["use the engine".into()],
            vec!["write more tests".into()],
            None,
        )
        .await
        .unwrap();
    engine
        .commit_session("engine-test-ws", "Second test session", vec![], vec![], None)
        .await
        .unwrap();

    let sessions = engine
        .last_session("engine-test-ws", 3, None)
        .await
        .unwrap();
    assert!(sessions.len() >= 2);
    assert_eq!(sessions[0].summary, "Second test session");
    let first = sessions
        .iter()
        .find(|s| s.summary == "First test session")
        .expect("first session must be present");
    assert_eq!(first.decisions, vec!["use the engine"]);
    assert_eq!(first.next_steps, vec!["write more tests"]);
}

#[tokio::test]
#[ignore]
async fn bootstrap_with_sessions_attaches_last_session() {
    let engine = engine().await;
    engine
        .commit_session("engine-test-boot", "Session for bootstrap", vec![], vec![], None)
        .await
        .unwrap();

    let result = engine
        .bootstrap(
            BootstrapRequest {
                workspace_hint: "engine-test-boot".into(),
                include_sessions: true,
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let last = result
        .last_session
        .expect("field must be present when sessions were requested")
        .expect("workspace has a session");
    assert_eq!(last.summary, "Session for bootstrap");
}
