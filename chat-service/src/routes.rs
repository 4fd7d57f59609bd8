//! 路由模块

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chat/start", post(handlers::start_chat))
        .route("/api/chat/message", post(handlers::send_message))
        .route("/api/health", get(handlers::health_check))
}
