//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use notifier::OrderPublisher;
use order_store::OrderRepository;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
}

/// GET /health: reports whether the order store answers.
///
/// Returns 503 while storage is unreachable so load balancers stop routing
/// order traffic here.
pub async fn check<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
) -> (StatusCode, Json<HealthResponse>)
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    match state.repository.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                storage: "up",
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "order store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    storage: "down",
                }),
            )
        }
    }
}
