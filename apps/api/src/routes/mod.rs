pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::names;
use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(names::HEALTH_URL, get(health::health_handler))
        .route(names::HOME_URL, get(handlers::handle_home))
        .route(names::PROFILE_URL, post(handlers::handle_profile))
        .route(names::RETRY_URL, post(handlers::handle_retry))
        .route(names::ANSWERS_URL, post(handlers::handle_answers))
        .route(names::RESET_URL, post(handlers::handle_reset))
        .route(names::CHAT_URL, post(handlers::handle_chat))
        .with_state(state)
}
