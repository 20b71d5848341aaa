//! Tool-call routing: one entry point per catalogue tool.

use mn_domain::error::{Error, Result};
use mn_engine::{BootstrapRequest, RequestContext, WriteMemory};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::state::AppState;
use crate::tools::{
    ensure_string_list, BootstrapArgs, CommitSessionArgs, LastSessionArgs, ReadArgs, SearchArgs,
    WriteArgs,
};

/// Validate the arguments for `name` and invoke the matching engine
/// operation, returning the typed result as a JSON value.
pub async fn handle_tool_call(
    state: &AppState,
    name: &str,
    arguments: Value,
    ctx: Option<&RequestContext>,
) -> Result<Value> {
    match name {
        "mnemosyne_bootstrap" => {
            let args: BootstrapArgs = parse_args(arguments)?;
            let result = state
                .engine
                .bootstrap(
                    BootstrapRequest {
                        limit_pinned: args.limit_pinned,
                        limit_recent: args.limit_recent,
                        workspace_hint: args.workspace_hint,
                        mode: args.mode,
                        max_tokens: args.max_tokens,
                        max_items: args.max_items,
                        include_sessions: args.include_sessions,
                    },
                    ctx,
                )
                .await?;
            Ok(serde_json::to_value(result)?)
        }
        "mnemosyne_write" => {
            let args: WriteArgs = parse_args(arguments)?;
            let tags = ensure_string_list(args.tags_json.as_ref());
            let result = state
                .engine
                .write_memory(
                    WriteMemory {
                        kind: args.kind,
                        title: args.title,
                        content: args.content,
                        tags,
                        pinned: args.pinned,
                        content_compact: args.content_compact,
                        workspace_hint: args.workspace_hint,
                        importance: args.importance,
                        source: args.source,
                    },
                    ctx,
                )
                .await?;
            Ok(serde_json::to_value(result)?)
        }
        "mnemosyne_read" => {
            let args: ReadArgs = parse_args(arguments)?;
            let result = state.engine.read_memory(&args.id, args.prefer, ctx).await?;
            Ok(serde_json::to_value(result)?)
        }
        "mnemosyne_search" => {
            let args: SearchArgs = parse_args(arguments)?;
            let result = state
                .engine
                .search_memory(&args.query, args.limit, args.prefer, args.snippet_chars, ctx)
                .await?;
            Ok(serde_json::to_value(result)?)
        }
        "mnemosyne_commit_session" => {
            let args: CommitSessionArgs = parse_args(arguments)?;
            let decisions = ensure_string_list(args.decisions_json.as_ref());
            let next_steps = ensure_string_list(args.next_steps_json.as_ref());
            let result = state
                .engine
                .commit_session(&args.workspace_hint, &args.summary, decisions, next_steps, ctx)
                .await?;
            Ok(serde_json::to_value(result)?)
        }
        "mnemosyne_last_session" => {
            let args: LastSessionArgs = parse_args(arguments)?;
            let result = state
                .engine
                .last_session(&args.workspace_hint, args.limit, ctx)
                .await?;
            Ok(serde_json::to_value(result)?)
        }
        other => Err(Error::Protocol(format!("unknown tool: {other}"))),
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| Error::Protocol(format!("invalid tool arguments: {e}")))
}
