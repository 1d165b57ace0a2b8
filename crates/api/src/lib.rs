//! HTTP API server with observability for the order service.
//!
//! Provides REST endpoints for creating, reading, updating and canceling
//! orders, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use notifier::OrderPublisher;
use order_store::OrderRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// Requests running past `request_timeout` are answered with a timeout
/// response and their handler future is dropped, which abandons any pending
/// storage or broker call.
pub fn create_app<R, P>(
    state: Arc<AppState<R, P>>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<R, P>))
        .route(
            "/orders",
            get(routes::orders::list::<R, P>).post(routes::orders::create::<R, P>),
        )
        .route(
            "/orders/{id}",
            get(routes::orders::get::<R, P>)
                .put(routes::orders::update::<R, P>)
                .delete(routes::orders::cancel::<R, P>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the order use cases onto a repository and a publisher.
pub fn create_state<R, P>(repository: R, publisher: P) -> Arc<AppState<R, P>>
where
    R: OrderRepository + Clone,
    P: OrderPublisher,
{
    Arc::new(AppState::new(repository, publisher))
}
