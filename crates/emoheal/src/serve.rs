// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `emoheal serve` command implementation.
//!
//! Wires the full backend: SQLite storage, the therapy engine (crisis
//! classifier, feature extractor, response selector), and the HTTP/WebSocket
//! gateway. Supports graceful shutdown via signal handlers.

use std::sync::Arc;

use tracing::{error, info};

use emoheal_config::EmohealConfig;
use emoheal_core::{EmohealError, PluginAdapter, StorageAdapter};
use emoheal_gateway::{GatewayState, QueryLimits, ServerConfig};
use emoheal_session::{shutdown, TherapyEngine};
use emoheal_storage::SqliteStorage;

/// Runs the `emoheal serve` command.
///
/// Initializes storage and the engine, binds the gateway, and serves until
/// a shutdown signal arrives. Any missing keyword or template document is
/// fatal here: the process refuses to start without its tables.
pub async fn run_serve(config: EmohealConfig) -> Result<(), EmohealError> {
    init_tracing(&config.agent.log_level);

    info!("starting emoheal serve");

    // Engine tables first: a config error here must fail before any socket
    // is accepted.
    let engine = Arc::new(TherapyEngine::from_config(&config).map_err(|e| {
        error!(error = %e, "failed to build therapy engine");
        eprintln!(
            "error: keyword or template tables could not be loaded. \
             Check triage.lexicon_path and responder.templates_path."
        );
        e
    })?);

    // Storage: explicitly constructed here and passed down; created at
    // process start, closed at process stop, no hidden re-initialization.
    let storage = {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Arc::new(storage)
    };

    // Install signal handler.
    let cancel = shutdown::install_signal_handler();

    let state = GatewayState {
        storage: storage.clone(),
        engine,
        welcome_message: Arc::from(config.agent.welcome_message.as_str()),
        limits: QueryLimits {
            default_days: config.summary.default_days,
            max_days: config.summary.max_days,
            history_page_limit: config.summary.history_page_limit,
        },
        start_time: std::time::Instant::now(),
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
        cors_permissive: config.gateway.cors_permissive,
    };

    emoheal_gateway::start_server(&server_config, state, cancel).await?;

    // Flush and close storage after the server drains.
    storage.shutdown().await?;

    info!("emoheal serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("emoheal={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
