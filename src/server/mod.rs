//! HTTP boundary: one route per card plus a health check.

pub mod cache;
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::Result;

pub use cache::CardCache;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/stats", get(handlers::stats_card))
        .route("/api/streak", get(handlers::streak_card))
        .route("/api/languages", get(handlers::languages_card))
        .route("/healthz", get(handlers::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving cards on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
