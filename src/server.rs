//! Axum webserver exposing the scoring API.
//!
//! Routes:
//! - `POST /api/score`   `{ walletAddress }`      -> snapshot
//! - `POST /api/compare` `{ walletA, walletB }`   -> `{ walletA, walletB, winner }`
//! - `GET  /api/health`

use crate::config::ServiceConfig;
use crate::error::{ComparisonError, ScoreError};
use crate::scoring::ScoringEngine;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

/// Shared state for all handlers.
pub struct AppState {
    pub engine: ScoringEngine,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRequest {
    #[serde(alias = "wallet", alias = "address")]
    wallet_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    #[serde(rename = "walletA", alias = "addressA", alias = "wallet1")]
    wallet_a: Option<String>,
    #[serde(rename = "walletB", alias = "addressB", alias = "wallet2")]
    wallet_b: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn status_for(client_error: bool) -> StatusCode {
    if client_error {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ScoreError {
    fn into_response(self) -> Response {
        error_response(status_for(self.is_client_error()), self.to_string())
    }
}

impl IntoResponse for ComparisonError {
    fn into_response(self) -> Response {
        error_response(status_for(self.is_client_error()), self.to_string())
    }
}

/// Treat a blank body field as missing. Anything else reaches the validator as sent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn score_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected /api/score body: {}", rejection);
            return ScoreError::MissingAddress.into_response();
        }
    };

    let Some(address) = present(request.wallet_address) else {
        return ScoreError::MissingAddress.into_response();
    };

    match state.engine.score_wallet(&address).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            if !e.is_client_error() {
                error!("/api/score failed for {}: {}", address, e);
            }
            e.into_response()
        }
    }
}

async fn compare_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected /api/compare body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Both wallet addresses are required");
        }
    };

    let (Some(wallet_a), Some(wallet_b)) = (present(request.wallet_a), present(request.wallet_b))
    else {
        return error_response(StatusCode::BAD_REQUEST, "Both wallet addresses are required");
    };

    match state.engine.compare_wallets(&wallet_a, &wallet_b).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            if !e.is_client_error() {
                error!("/api/compare failed: {}", e);
            }
            e.into_response()
        }
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(json!({
        "status": "ok",
        "upstreamConfigured": state.engine.is_configured(),
    }))
    .into_response()
}

/// API routes only, without static files.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/score", post(score_handler))
        .route("/api/compare", post(compare_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
}

/// Full application: API, static frontend and CORS.
pub fn build_app(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let mut app = api_router(state);

    if let Some(dir) = static_dir.filter(|dir| Path::new(dir).is_dir()) {
        info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServiceConfig, engine: ScoringEngine) -> anyhow::Result<()> {
    let state = Arc::new(AppState { engine });
    let app = build_app(state, config.static_dir.as_deref());

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.listen_addr, e))?;

    info!("Server running on http://{}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
