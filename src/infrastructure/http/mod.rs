use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::controllers::{health, synthesis::SynthesisController};
use crate::error::AppError;
use crate::infrastructure::auth::request_id_middleware;
use crate::infrastructure::config::Config;

/// Build the application router
pub fn build_router(synthesis_controller: Arc<SynthesisController>) -> Router {
    Router::new()
        .route("/", get(SynthesisController::synthesize))
        .route("/health", get(health::health))
        .with_state(synthesis_controller)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// A panic in a handler becomes a 500 with the generic body
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    synthesis_controller: Arc<SynthesisController>,
) -> anyhow::Result<()> {
    let app = build_router(synthesis_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
