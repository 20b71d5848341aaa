//! Integration tests for the JSON-RPC HTTP surface.
//!
//! Ignored by default; they expect a running Mnemosyne + Neo4j stack:
//!
//! ```sh
//! MNEMOSYNE_URL=http://localhost:8010/mcp cargo test -p mn-server -- --ignored
//! ```

use serde_json::{json, Value};

fn endpoint() -> String {
    std::env::var("MNEMOSYNE_URL").unwrap_or_else(|_| "http://localhost:8010/mcp".into())
}

async fn call_tool(client: &reqwest::Client, name: &str, arguments: Value) -> Value {
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments},
    });
    let response: Value = client
        .post(endpoint())
        .json(&payload)
        .send()
        .await
        .expect("server must be reachable")
        .json()
        .await
        .expect("response must be JSON");
    response
}

/// Extract and parse the tool result from the text envelope.
fn parse_tool_result(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result must be a text payload");
    serde_json::from_str(text).expect("text payload must be JSON")
}

#[tokio::test]
#[ignore]
async fn initialize_reports_protocol_and_server_info() {
    let client = reqwest::Client::new();
    let response: Value = client
        .post(endpoint())
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "mnemosyne");
}

#[tokio::test]
#[ignore]
async fn tools_list_exposes_the_catalogue() {
    let client = reqwest::Client::new();
    let response: Value = client
        .post(endpoint())
        .json(&json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 6);
}

#[tokio::test]
#[ignore]
async fn bootstrap_returns_pinned_and_recent_without_sessions() {
    let client = reqwest::Client::new();
    let response = call_tool(&client, "mnemosyne_bootstrap", json!({})).await;
    let result = parse_tool_result(&response);
    assert!(result["pinned"].is_array());
    assert!(result["recent"].is_array());
    // Legacy shape: no last_session field unless asked for.
    assert!(result.get("last_session").is_none());
}

#[tokio::test]
#[ignore]
async fn write_then_rewrite_reports_updated() {
    let client = reqwest::Client::new();
    let args = json!({
        "kind": "note",
        "title": "HTTP Test: Dedup",
        "content": "Original content",
    });
    let first = parse_tool_result(&call_tool(&client, "mnemosyne_write", args.clone()).await);
    assert_eq!(first["ok"], true);

    let mut args = args;
    args["content"] = json!("Updated content");
    let second = parse_tool_result(&call_tool(&client, "mnemosyne_write", args).await);
    assert_eq!(second["action"], "updated");
}

#[tokio::test]
#[ignore]
async fn write_and_read_roundtrip_with_compact() {
    let client = reqwest::Client::new();
    let write = parse_tool_result(
        &call_tool(
            &client,
            "mnemosyne_write",
            json!({
                "kind": "decision",
                "title": "HTTP Test: Read",
                "content": "Full detailed content for the read test",
                "content_compact": "Short summary",
                "importance": 70,
            }),
        )
        .await,
    );
    let id = write["id"].as_str().unwrap();

    let read = parse_tool_result(
        &call_tool(&client, "mnemosyne_read", json!({"id": id, "prefer": "full"})).await,
    );
    assert_eq!(read["content"], "Full detailed content for the read test");
    assert_eq!(read["content_compact"], "Short summary");
    assert_eq!(read["importance"], 70);
}

#[tokio::test]
#[ignore]
async fn read_unknown_id_returns_null() {
    let client = reqwest::Client::new();
    let response = call_tool(
        &client,
        "mnemosyne_read",
        json!({"id": "4:xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx:999999"}),
    )
    .await;
    assert!(parse_tool_result(&response).is_null());
}

#[tokio::test]
#[ignore]
async fn search_empty_query_returns_empty_list() {
    let client = reqwest::Client::new();
    let response = call_tool(&client, "mnemosyne_search", json!({"query": ""})).await;
    let result = parse_tool_result(&response);
    assert_eq!(result.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn commit_session_then_last_session() {
    let client = reqwest::Client::new();
    let commit = parse_tool_result(
        &call_tool(
            &client,
            "mnemosyne_commit_session",
            json!({
                "workspace_hint": "mnemosyne-http-test",
                "summary": "Test session over HTTP",
                "decisions_json": "[\"use the http suite\"]",
                "next_steps_json": "[\"add more tests\"]",
            }),
        )
        .await,
    );
    assert_eq!(commit["ok"], true);

    let sessions = parse_tool_result(
        &call_tool(
            &client,
            "mnemosyne_last_session",
            json!({"workspace_hint": "mnemosyne-http-test", "limit": 3}),
        )
        .await,
    );
    let sessions = sessions.as_array().unwrap();
    assert!(!sessions.is_empty());
    assert_eq!(sessions[0]["workspace_hint"], "mnemosyne-http-test");
}

#[tokio::test]
#[ignore]
async fn unknown_method_gets_a_jsonrpc_error() {
    let client = reqwest::Client::new();
    let response = client
        .post(endpoint())
        .json(&json!({"jsonrpc": "2.0", "id": 9, "method": "no/such/method"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("unknown method"));
}

#[tokio::test]
#[ignore]
async fn bootstrap_thin_mode_ships_compact_bodies() {
    let client = reqwest::Client::new();
    call_tool(
        &client,
        "mnemosyne_write",
        json!({
            "kind": "decision",
            "title": "HTTP Test: Thin",
            "content": "Very long ".repeat(100),
            "content_compact": "Short thin test",
            "pinned": true,
        }),
    )
    .await;

    let result = parse_tool_result(
        &call_tool(
            &client,
            "mnemosyne_bootstrap",
            json!({"mode": "thin", "max_tokens": 800, "limit_pinned": 25}),
        )
        .await,
    );
    let found = result["pinned"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["title"] == "HTTP Test: Thin");
    if let Some(item) = found {
        assert_eq!(item["content"], "Short thin test");
        assert_eq!(item["has_full"], true);
    }
}
