// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use std::{env, net::SocketAddr, sync::Arc};
use unfurl_node::{
    api::{start_server, AppState},
    unfurl::{UnfurlConfig, UnfurlService},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Unfurl Node...\n");
    println!("📦 BUILD VERSION: {}", unfurl_node::version::VERSION);
    println!("📅 Build Date: {}", unfurl_node::version::BUILD_DATE);
    println!();

    let api_port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());

    let config = UnfurlConfig::from_env();
    if let Err(e) = config.validate() {
        anyhow::bail!("Invalid unfurl configuration: {}", e);
    }
    tracing::info!(
        "Unfurl limits: {} redirects, {}s per hop, {} byte body cap, {}s cache TTL",
        config.max_redirects,
        config.timeout_per_hop_secs,
        config.max_body_bytes,
        config.cache_ttl_secs
    );

    let service = Arc::new(UnfurlService::with_defaults(config));
    let state = AppState {
        unfurl_service: service,
    };

    let addr: SocketAddr = format!("0.0.0.0:{}", api_port).parse()?;
    println!("✅ Unfurl service initialized");

    start_server(addr, state)
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {}", e))?;

    Ok(())
}
