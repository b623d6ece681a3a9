use async_trait::async_trait;

use super::prelude::*;

/// Postgres-backed user store.
#[derive(Clone)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        query!(
            r#"
            INSERT INTO users (id, name, birthday, status)
            VALUES ($1, $2, $3, $4)
            "#,
            user.id,
            user.name.as_str(),
            user.birthday.as_str(),
            user.status.as_i16()
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = query_as!(
            User,
            r#"
            SELECT id, name, birthday, status
            FROM users
            WHERE id = $1 AND status = $2
            "#,
            id,
            UserStatus::Active.as_i16()
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, StoreError> {
        let user = query_as!(
            User,
            r#"
            UPDATE users
            SET name = COALESCE($3, name),
                birthday = COALESCE($4, birthday)
            WHERE id = $1 AND status = $2
            RETURNING id, name, birthday, status
            "#,
            id,
            UserStatus::Active.as_i16(),
            patch.name.as_deref(),
            patch.birthday.as_deref()
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = query!(
            r#"
            UPDATE users
            SET status = $3
            WHERE id = $1 AND status = $2
            "#,
            id,
            UserStatus::Active.as_i16(),
            UserStatus::Deleted.as_i16()
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_active(&self) -> Result<Vec<User>, StoreError> {
        let users = query_as!(
            User,
            r#"
            SELECT id, name, birthday, status
            FROM users
            WHERE status = $1
            ORDER BY id
            "#,
            UserStatus::Active.as_i16()
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn get_including_deleted(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = query_as!(
            User,
            r#"
            SELECT id, name, birthday, status
            FROM users
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        query!("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        crate::migrate(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
