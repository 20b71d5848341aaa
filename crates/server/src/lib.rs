//! `mn-server` — the tool dispatcher and HTTP surface of Mnemosyne.
//!
//! Speaks JSON-RPC 2.0 over HTTP POST at `/mcp`: validates incoming tool
//! calls against the declared catalogue, routes them to the memory
//! engine, and serialises results as text payloads for the agent.

pub mod cli;
pub mod dispatch;
pub mod http;
pub mod rpc;
pub mod state;
pub mod tools;
