use axum::{http::StatusCode, routing::get, Router};

use crate::app::AppState;

pub(crate) const WELCOME: &str = "Welcome to the Birthbook user API!";

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

async fn home() -> (StatusCode, &'static str) {
    (StatusCode::OK, WELCOME)
}
