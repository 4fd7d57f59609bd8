//! 路由模块

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::view_config))
        .route("/update", post(handlers::update_config))
        .route(
            "/api/config",
            get(handlers::get_config).put(handlers::replace_config),
        )
        .route("/api/health", get(handlers::health_check))
}
