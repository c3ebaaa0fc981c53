mod candidates;
mod config;
mod db;
mod documents;
mod errors;
mod models;
mod notify;
mod routes;
mod screening;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::candidates::PgCandidateStore;
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::documents::{build_upload_store, FileTextSource};
use crate::notify::build_notifier;
use crate::routes::build_router;
use crate::screening::{Screener, Vocabulary};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    let uploads = build_upload_store(&config).await;
    let notifier = build_notifier(&config)?;

    let vocabulary = Arc::new(Vocabulary::default_skills());
    let screener = Screener::new(
        vocabulary,
        config.match_mode,
        config.scoring_policy.scorer(),
    );
    info!(
        "Screener ready: {} skills, {} matching, {} scoring",
        screener.vocabulary().len(),
        screener.mode(),
        screener.scorer_name()
    );

    let state = AppState {
        screener: Arc::new(screener),
        text_source: Arc::new(FileTextSource),
        uploads,
        candidates: Arc::new(PgCandidateStore::new(db)),
        notifier,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
