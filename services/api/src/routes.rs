//! API service routes

use std::any::Any;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

use crate::{error::ApiError, state::AppState};

pub mod contacts;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    // Every handler here takes an `AuthUser`
    let protected_routes = Router::new()
        .route(
            "/api/users/current",
            get(users::get_current).patch(users::update_current),
        )
        .route("/api/users/logout", delete(users::logout))
        .route("/api/contacts", post(contacts::create))
        .route(
            "/api/contacts/:contactId",
            get(contacts::get).put(contacts::update),
        );

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Only reaches routes registered above
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "contact-api"
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Handler panicked: {}", detail);

    ApiError::InternalServerError.into_response()
}
