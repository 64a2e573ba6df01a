pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};

async fn banner() -> &'static str {
    "Sheepify API — see /api/v1"
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        // Sleep
        .route("/api/v1/sleep/start", post(routes::sleep::start))
        .route("/api/v1/sleep/complete", post(routes::sleep::complete))
        .route("/api/v1/sleep/log", post(routes::sleep::log))
        .route("/api/v1/sleep/sessions", get(routes::sleep::sessions))
        .route("/api/v1/sleep/stats", get(routes::sleep::stats))
        // Flock
        .route("/api/v1/sheep", get(routes::sheep::list))
        .route("/api/v1/sheep/{id}", put(routes::sheep::update))
        .route("/api/v1/sheep/clear", post(routes::sheep::clear))
        // Wool
        .route("/api/v1/wool/balance", get(routes::wool::balance))
        .route("/api/v1/wool/spend", post(routes::wool::spend))
        .route("/api/v1/wool/history", get(routes::wool::history))
        // Profile
        .route("/api/v1/profile", get(routes::profile::get))
        .route("/api/v1/penalty/reset", post(routes::profile::reset_penalty))
        // Mascot
        .route("/api/v1/mascot/message", post(routes::mascot::message))
        .layer(cors)
        .with_state(app_state)
}

/// Start the Sheepify API server.
pub async fn serve(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let app = build_router(root);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sheepify API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
