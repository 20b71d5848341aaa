use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mn_domain::config::{Config, ConfigSeverity};
use mn_engine::MemoryEngine;
use mn_graph::GraphGateway;
use mn_server::cli::{Cli, Command};
use mn_server::http;
use mn_server::state::AppState;

/// Upper bound on in-flight requests; excess callers queue at the
/// listener instead of piling onto the store pool.
const MAX_CONCURRENT_REQUESTS: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Default to serve when no subcommand is given.
        None | Some(Command::Serve) => {
            init_tracing();
            run_server(Arc::new(Config::from_env())).await
        }
        Some(Command::Doctor) => {
            let config = Config::from_env();
            let passed = mn_server::cli::doctor::run(&config).await?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Version) => {
            println!("mnemosyne {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Initialize structured JSON tracing (only for the `serve` command).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mn_server=debug")),
        )
        .json()
        .init();
}

/// Start the memory server with the given configuration.
async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    tracing::info!("Mnemosyne starting");

    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    if issues.iter().any(|i| i.severity == ConfigSeverity::Error) {
        anyhow::bail!(
            "config validation failed with {} error(s)",
            issues
                .iter()
                .filter(|i| i.severity == ConfigSeverity::Error)
                .count()
        );
    }

    // ── Graph gateway (probe + schema install) ───────────────────────
    let gateway = Arc::new(
        GraphGateway::connect(&config.store)
            .await
            .context("connecting to graph store")?,
    );

    // ── Memory engine ────────────────────────────────────────────────
    let engine = Arc::new(MemoryEngine::new(gateway, config.store.multi_tenant));
    tracing::info!(
        multi_tenant = config.store.multi_tenant,
        "memory engine ready"
    );

    // ── Router ───────────────────────────────────────────────────────
    let state = AppState {
        config: config.clone(),
        engine,
    };
    let app = http::router(state)
        .layer(tower::limit::ConcurrencyLimitLayer::new(
            MAX_CONCURRENT_REQUESTS,
        ));

    // ── Bind ─────────────────────────────────────────────────────────
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    tracing::info!(addr = %addr, "Mnemosyne listening");

    axum::serve(listener, app)
        .await
        .context("axum server error")?;

    Ok(())
}
