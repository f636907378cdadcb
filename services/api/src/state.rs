//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{ContactRepository, ContactStore, UserRepository, UserStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub contacts: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, contacts: Arc<dyn ContactStore>) -> Self {
        Self { users, contacts }
    }

    /// State backed by the PostgreSQL repositories
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(ContactRepository::new(pool)),
        )
    }
}
