//! HTTP server implementation for the chirp API

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::core::AppState;
use crate::Result;

/// Creates the main application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration, permissive like the rest of the service
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // User routes
        .route("/sign-up", post(handlers::sign_up))
        .route("/sign-up", get(handlers::list_users))
        // Tweet routes
        .route("/tweets", post(handlers::post_tweet))
        .route("/tweets", get(handlers::list_tweets))
        .route("/tweets/:id", put(handlers::update_tweet))
        .route("/tweets/:id", delete(handlers::delete_tweet))
        // System routes
        .route("/health", get(handlers::health))
        // Apply middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Start the HTTP server.
///
/// Called only after the store handle inside `state` is ready, so no
/// request is ever accepted before the store connection exists. Drains
/// in-flight requests on Ctrl-C / SIGTERM.
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("received terminate signal");
        },
    }
}
