//! The HTTP surface: JSON-RPC 2.0 over POST `/mcp`.

use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use mn_domain::error::{Error, Result};
use mn_engine::RequestContext;

use crate::dispatch;
use crate::rpc::{JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, METHOD_NOT_FOUND};
use crate::state::AppState;
use crate::tools;

/// MCP protocol revision this server implements.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Per-request deadline for engine work. Clients default to 30 s, so the
/// server must not sit on a wedged store session longer than that.
const REQUEST_DEADLINE: Duration = Duration::from_secs(30);

/// Build the application router. Unknown paths get axum's default 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The single JSON-RPC endpoint.
///
/// Body parsing is done by hand so that a malformed body still produces a
/// JSON-RPC error envelope instead of a bare axum rejection.
async fn handle_mcp(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JsonRpcResponse::failure(
                    Value::Null,
                    INTERNAL_ERROR,
                    format!("malformed request: {e}"),
                )),
            );
        }
    };

    let id = request.id.clone().unwrap_or(Value::Null);
    let method = request.method.clone();
    match handle_method(&state, &headers, request).await {
        Ok(result) => (StatusCode::OK, Json(JsonRpcResponse::success(id, result))),
        Err(e) => {
            tracing::error!(method = %method, error = %e, "request failed");
            let code = match &e {
                Error::Protocol(_) => METHOD_NOT_FOUND,
                _ => INTERNAL_ERROR,
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JsonRpcResponse::failure(id, code, e.to_string())),
            )
        }
    }
}

async fn handle_method(
    state: &AppState,
    headers: &HeaderMap,
    request: JsonRpcRequest,
) -> Result<Value> {
    match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {"tools": {}},
            "serverInfo": {
                "name": "mnemosyne",
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "notifications/initialized" | "initialized" | "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tools::catalogue() })),
        "tools/call" => {
            let params = request.params.unwrap_or_else(|| json!({}));
            let name = params
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Protocol("tools/call without a tool name".into()))?
                .to_string();
            let arguments = params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));
            let ctx = context_from_headers(headers);

            let result = tokio::time::timeout(
                REQUEST_DEADLINE,
                dispatch::handle_tool_call(state, &name, arguments, Some(&ctx)),
            )
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "tool {name} exceeded the {}s deadline",
                    REQUEST_DEADLINE.as_secs()
                ))
            })??;

            // The agent-facing envelope carries the result as JSON text.
            let text = serde_json::to_string(&result)?;
            Ok(json!({ "content": [{ "type": "text", "text": text }] }))
        }
        other => Err(Error::Protocol(format!("unknown method: {other}"))),
    }
}

/// Build the request context from the optional identity headers.
///
/// The headers are unauthenticated hints; a production deployment fronts
/// this service with something that rewrites them.
fn context_from_headers(headers: &HeaderMap) -> RequestContext {
    let user_id = header_string(headers, "x-user-id");
    let space_id = header_string(headers, "x-space-id");
    let allowed_spaces = match (&space_id, &user_id) {
        (Some(space), _) => Some(vec![space.clone()]),
        (None, Some(user)) => Some(vec![format!("personal:{user}")]),
        (None, None) => None,
    };
    RequestContext {
        user_id,
        space_id,
        allowed_spaces,
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prefers_space_over_user() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "alice".parse().unwrap());
        headers.insert("x-space-id", "team:x".parse().unwrap());
        let ctx = context_from_headers(&headers);
        assert_eq!(ctx.allowed_spaces, Some(vec!["team:x".to_string()]));
    }

    #[test]
    fn context_derives_personal_space_from_user() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "alice".parse().unwrap());
        let ctx = context_from_headers(&headers);
        assert_eq!(
            ctx.allowed_spaces,
            Some(vec!["personal:alice".to_string()])
        );
    }

    #[test]
    fn empty_headers_yield_empty_context() {
        let ctx = context_from_headers(&HeaderMap::new());
        assert!(ctx.user_id.is_none());
        assert!(ctx.space_id.is_none());
        assert!(ctx.allowed_spaces.is_none());
    }
}
