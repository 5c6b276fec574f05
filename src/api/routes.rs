use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Storefront pages
        .route("/", get(handlers::index))
        .route("/index", get(handlers::index))
        .route("/main", get(handlers::main_page))
        // Accounts
        .route("/signup", get(handlers::signup_form).post(handlers::signup))
        .route("/signin", get(handlers::signin_form).post(handlers::signin))
        // Recommendations
        .route("/recommendations", post(handlers::recommendations))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
