use std::sync::Arc;
use std::time::Instant;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use birthbook_core::UserStore;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub started_at: Instant,
    pub config: ServerConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, config: ServerConfig) -> Self {
        Self {
            store,
            started_at: Instant::now(),
            config,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;
    crate::http::router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::map_response(
            crate::http::routes::method_not_allowed_as_json,
        ))
}
