use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a user record. `Deleted` is terminal: records are
/// soft-deleted and never erased.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active = 1,
    Deleted = 2,
}

impl UserStatus {
    /// Column representation used by both SQL backends (`SMALLINT`/`INTEGER`).
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        self as i16
    }

    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl TryFrom<i32> for UserStatus {
    type Error = EnumParseError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Active),
            2 => Ok(Self::Deleted),
            _ => Err(EnumParseError::new("user_status", value.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct EnumParseError {
    enum_name: &'static str,
    value: String,
}

impl EnumParseError {
    fn new(enum_name: &'static str, value: impl Into<String>) -> Self {
        Self {
            enum_name,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value: {}", self.enum_name, self.value)
    }
}

impl std::error::Error for EnumParseError {}
