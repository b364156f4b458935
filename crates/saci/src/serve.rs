// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `saci serve` command implementation.
//!
//! Wires the configured OpenRouter completion provider, Z-API delivery
//! provider, optional SQLite chat log, and relay pipeline into the webhook
//! gateway, then serves until interrupted.

use std::sync::Arc;

use tracing::{info, warn};

use saci_config::SaciConfig;
use saci_core::SaciError;
use saci_gateway::{start_server, GatewayState, ServerConfig};
use saci_openrouter::OpenRouterClient;
use saci_relay::{load_system_prompt, Pipeline, PipelineConfig};
use saci_storage::ChatLog;
use saci_zapi::ZapiClient;

/// Runs the `saci serve` command.
pub async fn run_serve(config: SaciConfig) -> Result<(), SaciError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting saci serve");

    let completion = Arc::new(OpenRouterClient::new(&config.openrouter)?);
    let delivery = Arc::new(ZapiClient::new(&config.zapi)?);

    let log = if config.storage.database_path.is_empty() {
        warn!("storage.database_path is empty, durable chat log disabled");
        None
    } else {
        Some(Arc::new(ChatLog::open(&config.storage.database_path).await?))
    };

    let system_prompt = load_system_prompt(
        &config.relay.system_prompt,
        config.relay.system_prompt_file.as_deref(),
    );

    let pipeline = Pipeline::new(
        completion,
        delivery,
        log.clone(),
        PipelineConfig {
            system_prompt,
            model: config.openrouter.model.clone(),
            max_tokens: config.openrouter.max_tokens,
            context_turns: config.relay.context_turns,
            max_threads: config.relay.max_threads,
            sentinel_empty: config.relay.sentinel_empty.clone(),
            sentinel_error: config.relay.sentinel_error.clone(),
        },
    );

    let state = GatewayState {
        pipeline: Arc::new(pipeline),
        start_time: std::time::Instant::now(),
    };
    let server_config = ServerConfig {
        bind_address: config.gateway.bind_address.clone(),
        port: config.gateway.port,
    };

    let result = tokio::select! {
        result = start_server(&server_config, state) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            Ok(())
        }
    };

    if let Some(log) = log {
        if let Err(e) = log.close().await {
            warn!(error = %e, "failed to checkpoint chat log on shutdown");
        }
    }

    result
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("saci={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
