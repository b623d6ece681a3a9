use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app::AppState;
use crate::domains::errors::ServiceError;
use crate::domains::users::service::{
    self, CreateUserCommand, SearchUsersCommand, UpdateUserCommand, UserAgeCommand,
};

use super::types::{
    AgeQuery, AgeResponse, CreateUserRequest, ErrorResponse, MessageResponse, SearchQuery,
    UpdateUserRequest, UserResponse,
};

fn error_response(status: StatusCode, code: &'static str) -> Response {
    (status, Json(ErrorResponse { error: code })).into_response()
}

fn map_service_error(error: ServiceError) -> Response {
    match error {
        ServiceError::BadRequest(code) => error_response(StatusCode::BAD_REQUEST, code),
        ServiceError::NotFound => error_response(StatusCode::NOT_FOUND, "user_not_found"),
        ServiceError::Store(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store_error")
        }
    }
}

fn map_json_rejection(rejection: &JsonRejection) -> Response {
    tracing::debug!(event = "request_body_rejected", error = %rejection);
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return error_response(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large");
    }
    error_response(StatusCode::BAD_REQUEST, "invalid_json")
}

fn map_query_rejection(rejection: &QueryRejection) -> Response {
    tracing::debug!(event = "request_query_rejected", error = %rejection);
    error_response(StatusCode::BAD_REQUEST, "invalid_query")
}

#[tracing::instrument(skip(state, payload))]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return map_json_rejection(&rejection),
    };
    let command = CreateUserCommand {
        name: payload.name,
        birthday: payload.birthday,
    };
    match service::create_user(&state, command).await {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(user))).into_response(),
        Err(err) => map_service_error(err),
    }
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match service::get_user(&state, &id).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(err) => map_service_error(err),
    }
}

#[tracing::instrument(skip(state, payload))]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return map_json_rejection(&rejection),
    };
    let command = UpdateUserCommand {
        id,
        name: payload.name,
        birthday: payload.birthday,
    };
    match service::update_user(&state, command).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(err) => map_service_error(err),
    }
}

#[tracing::instrument(skip(state))]
pub(crate) async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match service::delete_user(&state, &id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "user_soft_deleted",
            }),
        )
            .into_response(),
        Err(err) => map_service_error(err),
    }
}

#[tracing::instrument(skip(state, query))]
pub(crate) async fn user_age(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<AgeQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return map_query_rejection(&rejection),
    };
    let command = UserAgeCommand {
        id,
        date: query.date,
    };
    match service::user_age(&state, command).await {
        Ok(age) => (StatusCode::OK, Json(AgeResponse { age })).into_response(),
        Err(err) => map_service_error(err),
    }
}

#[tracing::instrument(skip(state, query))]
pub(crate) async fn search_users(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return map_query_rejection(&rejection),
    };
    let command = SearchUsersCommand {
        min_age: query.min_age,
        max_age: query.max_age,
        date: query.date,
    };
    match service::search_users(&state, command).await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(err) => map_service_error(err),
    }
}
