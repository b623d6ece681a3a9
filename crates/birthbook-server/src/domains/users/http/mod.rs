use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;

mod handlers;
pub(crate) mod types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/search", get(handlers::search_users))
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/users/:id/age", get(handlers::user_age))
}
