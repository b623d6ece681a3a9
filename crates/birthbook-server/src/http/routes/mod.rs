use crate::app::AppState;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};

use crate::domains::users::http::types::ErrorResponse;

pub(crate) mod health;
pub(crate) mod home;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(health::router())
        .merge(crate::domains::users::http::router())
        .fallback(not_found)
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: "not_found" }),
    )
        .into_response()
}

/// Gives the bare 405 that axum emits for a known path with an unrouted
/// method the same JSON error body as every other failure. The `Allow`
/// header is kept.
pub(crate) async fn method_not_allowed_as_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "method_not_allowed",
        }),
    )
        .into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(header::ALLOW, allow);
    }
    json
}
