use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::render::{render_card, render_error_card, CardKind};
use crate::server::state::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml; charset=utf-8";
const NO_STORE: &str = "no-cache, no-store, must-revalidate";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn stats_card(State(state): State<AppState>) -> Response {
    card_response(&state, CardKind::Stats).await
}

pub async fn streak_card(State(state): State<AppState>) -> Response {
    card_response(&state, CardKind::Streak).await
}

pub async fn languages_card(State(state): State<AppState>) -> Response {
    card_response(&state, CardKind::Languages).await
}

/// Always answers with an SVG: the card itself, or an error card explaining
/// why it could not be built.
async fn card_response(state: &AppState, kind: CardKind) -> Response {
    let aggregator = match state.aggregator() {
        Ok(aggregator) => aggregator,
        Err(e) => {
            tracing::error!("Cannot build {} card: {}", kind, e);
            return svg_response(render_error_card(&e.card_message(), &state.theme), NO_STORE);
        }
    };

    let rendered = state
        .cache
        .get_or_render(kind, render_card(&aggregator, kind, &state.theme))
        .await;

    match rendered {
        Ok(svg) => svg_response(svg.as_str().to_string(), &state.config.cache_control()),
        Err(e) => {
            let login = aggregator.login();
            if e.is_retryable() {
                tracing::warn!("Temporary failure building {} card for {}: {}", kind, login, e);
            } else {
                tracing::error!("Failed to build {} card for {}: {}", kind, login, e);
            }
            svg_response(render_error_card(&e.card_message(), &state.theme), NO_STORE)
        }
    }
}

fn svg_response(body: String, cache_control: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, cache_control.to_string()),
        ],
        body,
    )
        .into_response()
}
