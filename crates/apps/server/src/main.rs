mod config;
mod error;
mod routes;

use std::sync::Arc;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use canvas::PixelStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::error::ApiError;

#[derive(Clone)]
struct AppState {
    store: Arc<PixelStore>,
    config: Arc<ServerConfig>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env();
    let store = if config.seed {
        PixelStore::seeded()
    } else {
        PixelStore::new()
    };

    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    };
    routes::log_startup(&state);

    let addr = state.config.addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!("pixel server listening on http://{addr}");
    if let Err(err) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
    }
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(routes::healthz))
        .route(
            "/api/pixels",
            get(routes::list_pixels)
                .post(routes::create_pixel)
                .delete(routes::delete_pixel),
        )
        .route("/api/pixels/bounds", get(routes::pixels_in_bounds))
        .route("/api/pixels/recent", get(routes::recent_pixels))
        .route("/api/pixels/extent", get(routes::pixel_extent))
        .route("/api/clicks", post(routes::click))
        .route("/api/stats", get(routes::stats))
        .route("/api/palette", get(routes::palette))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
