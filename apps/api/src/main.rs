mod config;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::recommendation::registry::SharedRegistry;
use crate::recommendation::scoring::{LogisticScoringEngine, ScoringEngine};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NextStep API v{}", env!("CARGO_PKG_VERSION"));

    // Career models are loaded once; later swaps go through /api/v1/careers/reload
    let source = config.registry_source();
    let registry = Arc::new(SharedRegistry::load(source.clone())?);
    info!(
        "Career registry loaded from {source} ({} careers)",
        registry.current().len()
    );

    let engine: Arc<dyn ScoringEngine> = Arc::new(LogisticScoringEngine);
    info!(
        "Scoring engine: {} (default top_k {}, explanation top_n {})",
        engine.backend(),
        config.default_top_k,
        config.explanation_top_n
    );

    let state = AppState {
        config: config.clone(),
        registry,
        engine,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
