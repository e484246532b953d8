pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::networking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/find-professionals",
            post(handlers::handle_find_professionals),
        )
        .route("/send-emails", post(handlers::handle_send_emails))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
