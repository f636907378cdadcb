//! Repositories for database operations
//!
//! Handlers talk to the store traits; the PostgreSQL repositories are the
//! production implementations.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{
    contact::{Contact, ContactFields},
    user::{NewUser, UpdateUser, User},
};

pub mod contact;
pub mod user;

pub use contact::ContactRepository;
pub use user::UserRepository;

/// Persistence for users and their session tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; `None` when the username is already taken
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// Exact token match
    async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<User>>;

    async fn set_token(&self, username: &str, token: &str) -> DatabaseResult<()>;

    async fn clear_token(&self, username: &str) -> DatabaseResult<()>;

    /// Write the `Some` fields of `changes`; `None` when the user is gone
    async fn update(&self, username: &str, changes: &UpdateUser) -> DatabaseResult<Option<User>>;
}

/// Persistence for contacts, always scoped to the owning username
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create(&self, username: &str, fields: &ContactFields) -> DatabaseResult<Contact>;

    /// `None` when the contact does not exist or belongs to someone else
    async fn find_owned(&self, username: &str, id: i32) -> DatabaseResult<Option<Contact>>;

    /// Replace every mutable field; `None` under the same rule as `find_owned`
    async fn update_owned(
        &self,
        username: &str,
        id: i32,
        fields: &ContactFields,
    ) -> DatabaseResult<Option<Contact>>;
}
