//! `mn-domain` — shared configuration and error types for Mnemosyne.
//!
//! Everything here is plain data: no I/O beyond reading environment
//! variables at startup, no graph-store knowledge beyond the connection
//! parameters.

pub mod config;
pub mod error;

pub use config::{Config, ConfigIssue, ConfigSeverity, ServerConfig, StoreConfig};
pub use error::{Error, Result};
