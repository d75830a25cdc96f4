pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat;
use crate::forms;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/chat", post(chat::handlers::handle_chat))
        .route(
            "/api/v1/forms/analyze",
            post(forms::handlers::handle_analyze_form),
        )
        .route(
            "/api/v1/forms/fill",
            post(forms::handlers::handle_fill_form),
        )
        .with_state(state)
}
