use birthbook_core::User;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, JsonSchema)]
pub(crate) struct ErrorResponse {
    pub(crate) error: &'static str,
}

#[derive(Serialize, JsonSchema)]
pub(crate) struct MessageResponse {
    pub(crate) message: &'static str,
}

#[derive(Serialize, JsonSchema)]
pub(crate) struct AgeResponse {
    pub(crate) age: u32,
}

#[derive(Serialize, JsonSchema)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) birthday: String,
    pub(crate) deleted: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            deleted: user.status.is_deleted(),
            name: user.name,
            birthday: user.birthday,
        }
    }
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct CreateUserRequest {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) birthday: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct UpdateUserRequest {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) birthday: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct AgeQuery {
    /// Reference date, `YYYY-MM-DD`. Defaults to today (UTC).
    #[serde(default)]
    pub(crate) date: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub(crate) struct SearchQuery {
    /// Inclusive lower bound on age in whole years.
    #[serde(default)]
    pub(crate) min_age: Option<String>,
    /// Inclusive upper bound on age in whole years.
    #[serde(default)]
    pub(crate) max_age: Option<String>,
    #[serde(default)]
    pub(crate) date: Option<String>,
}
