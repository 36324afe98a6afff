// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Router and request handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hyperdpo_api::{
    handle_evolve, ApiError, ErrorBody, ErrorDetail, ErrorKind, EvolveRequest, Limits,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Immutable state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Request ceilings.
    pub limits: Limits,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Failure of an HTTP request, rendered as `{ "error": { kind, message } }`.
#[derive(Debug)]
pub struct HttpError(ErrorBody);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err.kind() {
            ErrorKind::Validation => warn!(%err, "rejected evolve request"),
            ErrorKind::Internal => error!(%err, "evolve request failed"),
        }
        Self(err.body())
    }
}

impl HttpError {
    fn internal(message: impl Into<String>) -> Self {
        Self(ErrorBody {
            error: ErrorDetail {
                kind: ErrorKind::Internal,
                message: message.into(),
            },
        })
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match self.0.error.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self.0)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/evolve", post(evolve))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(Health { status: "ok" })
}

async fn evolve(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvolveRequest>,
) -> Result<Response, HttpError> {
    let limits = state.limits;
    // Rewriting is CPU-bound and runs on the blocking pool.
    let outcome = tokio::task::spawn_blocking(move || handle_evolve(&request, &limits))
        .await
        .map_err(|join| {
            error!(%join, "evolve task did not complete");
            HttpError::internal("evolution task did not complete")
        })?;
    Ok(Json(outcome?).into_response())
}
