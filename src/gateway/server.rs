use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::auth;
use crate::config::ParleyConfig;
use crate::engine::ConversationEngine;
use crate::memory::MemoryEntry;
use crate::types::{Analysis, ChatReply};

pub struct AppState {
    pub token: Option<String>,
    pub engine: ConversationEngine,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

pub async fn run(config: ParleyConfig, token: Option<String>) -> anyhow::Result<()> {
    let is_loopback = config.gateway.bind == "127.0.0.1" || config.gateway.bind == "::1";

    if !is_loopback && token.is_none() {
        anyhow::bail!(
            "Auth token required when binding to non-loopback address. \
             Set --token or PARLEY_TOKEN env var."
        );
    }

    let engine = ConversationEngine::from_config(&config);
    info!(
        backend = engine.backend_name(),
        history_window = config.engine.history_window,
        rule_order = ?config.engine.rule_order,
        "conversation engine ready"
    );

    let addr = format!("{}:{}", config.gateway.bind, config.gateway.port);
    let state = Arc::new(AppState { token, engine });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("parley gateway listening on {addr}");
    if is_loopback {
        info!("bound to loopback, local access only");
    } else {
        warn!("bound to {addr}, bearer token required on /api routes");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the HTTP routes over a shared engine.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/chat", post(chat))
        .route("/api/analyze", post(analyze))
        .route("/api/sessions/{session_id}/history", get(history))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_token,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn require_token(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !auth::verify_bearer(presented, &state.token) {
        warn!(path = %request.uri().path(), "rejected request with missing or invalid token");
        return (StatusCode::UNAUTHORIZED, "missing or invalid token").into_response();
    }

    next.run(request).await
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    Json(state.engine.handle_message(&req.session_id, &req.message).await)
}

async fn analyze(Json(req): Json<AnalyzeRequest>) -> Json<Analysis> {
    Json(crate::nlp::analyze(&req.text))
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<Vec<MemoryEntry>> {
    Json(state.engine.memory().history(&session_id).await)
}
