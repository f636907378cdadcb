//! Contact repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::ContactStore;
use crate::models::contact::{Contact, ContactFields};

/// Contact repository
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn create(&self, username: &str, fields: &ContactFields) -> DatabaseResult<Contact> {
        info!("Creating contact for user: {}", username);

        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, username)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, phone, username
            "#,
        )
        .bind(&fields.first_name)
        .bind(fields.last_name.as_deref())
        .bind(fields.email.as_deref())
        .bind(fields.phone.as_deref())
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn find_owned(&self, username: &str, id: i32) -> DatabaseResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, first_name, last_name, email, phone, username
            FROM contacts
            WHERE id = $1 AND username = $2
            "#,
        )
        .bind(id)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn update_owned(
        &self,
        username: &str,
        id: i32,
        fields: &ContactFields,
    ) -> DatabaseResult<Option<Contact>> {
        info!("Updating contact {} for user: {}", id, username);

        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET first_name = $3,
                last_name = $4,
                email = $5,
                phone = $6
            WHERE id = $1 AND username = $2
            RETURNING id, first_name, last_name, email, phone, username
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(&fields.first_name)
        .bind(fields.last_name.as_deref())
        .bind(fields.email.as_deref())
        .bind(fields.phone.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }
}
