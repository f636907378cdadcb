//! User models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity as stored in the `users` table.
///
/// Not `Serialize`: responses go through [`UserResponse`] so the password
/// hash and session token never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
    pub name: String,
    pub token: Option<String>,
}

/// New user creation payload, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
}

/// User update payload, only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Request for user registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request for user login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request for updating the current user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public projection of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// Response for a successful login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
