use aide::axum::{
    routing::{get, post},
    ApiRouter,
};
use aide::openapi::{Info, OpenApi};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::domains::users::http::types::{
    AgeQuery, AgeResponse, CreateUserRequest, MessageResponse, SearchQuery, UpdateUserRequest,
    UserResponse,
};
use crate::http::routes::health::HealthResponse;

pub fn build_openapi() -> OpenApi {
    let mut api = OpenApi {
        info: Info {
            title: "birthbook-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    let _ = doc_router().finish_api(&mut api);
    api
}

fn doc_router() -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route("/health", get(health))
        .api_route("/users", post(users_create))
        .api_route("/users/search", get(users_search))
        .api_route(
            "/users/:id",
            get(users_get).put(users_update).delete(users_delete),
        )
        .api_route("/users/:id/age", get(users_age))
}

fn not_implemented<T>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::NOT_IMPLEMENTED, Json(body))
}

fn empty_user() -> UserResponse {
    UserResponse {
        id: String::new(),
        name: String::new(),
        birthday: String::new(),
        deleted: false,
    }
}

async fn health() -> (StatusCode, Json<HealthResponse>) {
    not_implemented(HealthResponse {
        status: "not_implemented",
        version: "0.0.0",
        build_commit: None,
        uptime_seconds: 0,
    })
}

async fn users_create(Json(_payload): Json<CreateUserRequest>) -> (StatusCode, Json<UserResponse>) {
    not_implemented(empty_user())
}

async fn users_get(Path(_id): Path<String>) -> (StatusCode, Json<UserResponse>) {
    not_implemented(empty_user())
}

async fn users_update(
    Path(_id): Path<String>,
    Json(_payload): Json<UpdateUserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    not_implemented(empty_user())
}

async fn users_delete(Path(_id): Path<String>) -> (StatusCode, Json<MessageResponse>) {
    not_implemented(MessageResponse {
        message: "not_implemented",
    })
}

async fn users_age(
    Path(_id): Path<String>,
    Query(_query): Query<AgeQuery>,
) -> (StatusCode, Json<AgeResponse>) {
    not_implemented(AgeResponse { age: 0 })
}

async fn users_search(Query(_query): Query<SearchQuery>) -> (StatusCode, Json<Vec<UserResponse>>) {
    not_implemented(Vec::new())
}
