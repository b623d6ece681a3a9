use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{User, UserPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx_core::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx_core::migrate::MigrateError),
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

/// Record store for users.
///
/// Every read and write except [`UserStore::insert`] and
/// [`UserStore::get_including_deleted`] only sees records whose status is
/// `Active`; implementations bind that filter into each query.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    async fn find_active(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Applies the provided fields and returns the updated record, or `None`
    /// when no active record has this id.
    async fn update_fields(&self, id: Uuid, patch: &UserPatch)
        -> Result<Option<User>, StoreError>;

    /// Marks an active record as deleted. Returns `false` when nothing matched.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// All active records in creation order.
    async fn list_active(&self) -> Result<Vec<User>, StoreError>;

    /// Raw lookup that ignores status; soft-deleted rows are still stored.
    async fn get_including_deleted(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn migrate(&self) -> Result<(), StoreError>;

    async fn close(&self);

    fn backend(&self) -> &'static str;
}
