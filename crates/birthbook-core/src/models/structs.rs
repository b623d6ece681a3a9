use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Calendar date text, `YYYY-MM-DD`. Kept as text so that rows written
    /// outside the service surface as age errors instead of decode failures.
    pub birthday: String,
    pub status: UserStatus,
}

impl User {
    #[must_use]
    pub fn new_active(name: impl Into<String>, birthday: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            birthday: birthday.into(),
            status: UserStatus::Active,
        }
    }
}

/// Partial update of the mutable user fields. `status` is deliberately absent:
/// the only way to change it is a soft-delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub birthday: Option<String>,
}

impl UserPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.birthday.is_none()
    }
}
