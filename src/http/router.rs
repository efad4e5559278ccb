//! Router configuration for the HTTP API.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::middleware::log_requests;

/// Create the application router; resource routes live under `api_prefix`
pub fn create_router(state: AppState, api_prefix: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Parents
        .route("/parents", post(handlers::create_parent).get(handlers::list_parents))
        .route("/parents/:id", get(handlers::get_parent).put(handlers::update_parent))
        // Students
        .route("/students", post(handlers::create_student).get(handlers::list_students))
        .route("/students/:id", get(handlers::get_student).put(handlers::update_student))
        // Classes
        .route("/classes", post(handlers::create_class).get(handlers::list_classes))
        .route("/classes/:id", get(handlers::get_class))
        .route("/classes/:id/students", get(handlers::list_class_students))
        .route("/classes/:id/register", post(handlers::register_student))
        // Subscriptions
        .route("/subscriptions", post(handlers::create_subscription).get(handlers::list_subscriptions))
        .route("/subscriptions/:id", get(handlers::get_subscription))
        .route("/subscriptions/:id/use", patch(handlers::mark_session_used));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest(api_prefix, api)
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
