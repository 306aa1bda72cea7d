//! HTTP prediction service for the hearth house-price model.
//!
//! [`app`] assembles the router around a shared [`AppState`]; the
//! `hearth-server` binary loads the state from the configured artifact and
//! serves it.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::AppError;
pub use state::{AppState, ModelInfo};

/// Builds the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let mut logged_routes: Router<Arc<AppState>> =
        Router::new().route("/predict", post(handlers::predict::predict));
    if state.config.diagnostics {
        logged_routes = logged_routes
            .route("/diagnose", get(handlers::diagnostics::diagnose))
            .route("/test", get(handlers::diagnostics::test));
    }
    let logged_routes = logged_routes.layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .merge(hearth_web::router())
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
