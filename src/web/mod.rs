//! # Web Boundary
//!
//! Thin axum transport over the dispatcher: one business route, a health
//! probe, and a JSON 404 fallback. All business outcomes, including the
//! error statuses, come back from the core as `(payload, status)` pairs;
//! the transport only adds body parsing, request ids and the response
//! envelope.

pub mod errors;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use errors::ApiError;
pub use state::AppState;

/// Assemble the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/method", post(handlers::method::method_handler))
        .route("/health", get(handlers::health::health))
        .fallback(|| async { ApiError::NotFound })
        .with_state(state)
}

/// Serve until ctrl-c. Shutdown cancels `cancel` first so in-flight store
/// retry loops abort instead of sleeping out their backoff budget.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
            cancel.cancel();
        })
        .await
}
