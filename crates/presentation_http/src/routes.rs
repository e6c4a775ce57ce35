//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::mailbox::index))
        .route("/create", post(handlers::mailbox::create))
        .route("/inbox", get(handlers::mailbox::inbox))
        .route("/message/{id}", get(handlers::mailbox::message_detail))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}
