//! Contact manager API
//!
//! A REST service for user accounts and a per-user contact list. Requests
//! flow through session-token authentication, payload validation and the
//! user or contact handlers before reaching the store, and every response
//! is wrapped in a `{ "data": ... }` or `{ "errors": ... }` envelope.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
