//! User repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::UserStore;
use crate::models::user::{NewUser, UpdateUser, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<Option<User>> {
        info!("Creating new user: {}", new_user.username);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING username, password, name, token
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password, name, token
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password, name, token
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_token(&self, username: &str, token: &str) -> DatabaseResult<()> {
        sqlx::query("UPDATE users SET token = $2 WHERE username = $1")
            .bind(username)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_token(&self, username: &str) -> DatabaseResult<()> {
        info!("Clearing session token for user: {}", username);

        sqlx::query("UPDATE users SET token = NULL WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, username: &str, changes: &UpdateUser) -> DatabaseResult<Option<User>> {
        info!("Updating user: {}", username);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                password = COALESCE($3, password)
            WHERE username = $1
            RETURNING username, password, name, token
            "#,
        )
        .bind(username)
        .bind(changes.name.as_deref())
        .bind(changes.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
