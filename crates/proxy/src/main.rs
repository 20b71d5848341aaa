//! `mnemosyne-proxy` — stdio-to-HTTP bridge for agent clients.
//!
//! Editors speak MCP over stdio; the server speaks JSON-RPC over HTTP.
//! The proxy is a pure passthrough: each newline-delimited JSON-RPC line
//! on stdin is POSTed to the server, and the response line is written to
//! stdout. It knows nothing about the tools themselves.
//!
//! Environment:
//!   MNEMOSYNE_URL — HTTP endpoint (default: http://localhost:8010/mcp)

use std::time::Duration;

use anyhow::Context;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8010/mcp";
const TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout is the protocol channel; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let url = std::env::var("MNEMOSYNE_URL").unwrap_or_else(|_| DEFAULT_URL.into());
    let http = reqwest::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .context("building HTTP client")?;

    tracing::info!(url = %url, "mnemosyne proxy ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Notifications have no id and expect no response line.
        let id = serde_json::from_str::<Value>(trimmed)
            .ok()
            .and_then(|v| v.get("id").cloned())
            .filter(|id| !id.is_null());

        match forward(&http, &url, trimmed).await {
            Ok(body) => {
                if id.is_some() {
                    write_line(&mut stdout, body.trim()).await?;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "forwarding failed");
                if let Some(id) = id {
                    let envelope = json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": {"code": -32603, "message": e.to_string()},
                    });
                    write_line(&mut stdout, &envelope.to_string()).await?;
                }
            }
        }
    }

    tracing::info!("stdin closed, proxy exiting");
    Ok(())
}

/// POST one request body and return the raw response body.
async fn forward(client: &reqwest::Client, url: &str, body: &str) -> anyhow::Result<String> {
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .context("sending request")?;
    response.text().await.context("reading response body")
}

async fn write_line(stdout: &mut tokio::io::Stdout, line: &str) -> anyhow::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
