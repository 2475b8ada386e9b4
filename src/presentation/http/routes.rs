//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(read_routes())
        .merge(write_routes(state))
}

/// Public read routes (listings and detail pages)
fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(handlers::feed::index))
        .route("/posts/{post_id}", get(handlers::post::post_detail))
        .route("/groups/{slug}", get(handlers::group::group_detail))
        .route("/groups/{slug}/posts", get(handlers::feed::group_posts))
        .route("/users/{username}/posts", get(handlers::feed::profile))
}

/// Protected write routes (require authentication)
fn write_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", post(handlers::post::create_post))
        .route("/posts/{post_id}", patch(handlers::post::edit_post))
        .route("/groups", post(handlers::group::create_group))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
