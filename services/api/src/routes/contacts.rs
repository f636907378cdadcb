//! Contact handlers
//!
//! Every lookup is scoped to the caller: a contact owned by someone else is
//! reported exactly like a missing one.

use axum::extract::State;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ContactId},
    middleware::AuthUser,
    models::{
        DataResponse,
        contact::{ContactRequest, ContactResponse},
    },
    state::AppState,
    validation,
};

fn contact_not_found() -> ApiError {
    ApiError::NotFound("Contact is not found".to_string())
}

/// Create a contact owned by the caller
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> ApiResult<DataResponse<ContactResponse>> {
    let fields = validation::validate_contact(&payload)?;

    let contact = state.contacts.create(&user.username, &fields).await?;
    info!("Created contact {} for user: {}", contact.id, user.username);

    Ok(DataResponse::new(contact.into()))
}

/// Fetch one of the caller's contacts
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    ContactId(id): ContactId,
) -> ApiResult<DataResponse<ContactResponse>> {
    let contact = state
        .contacts
        .find_owned(&user.username, id)
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(DataResponse::new(contact.into()))
}

/// Replace the mutable fields of one of the caller's contacts
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    ContactId(id): ContactId,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> ApiResult<DataResponse<ContactResponse>> {
    let fields = validation::validate_contact(&payload)?;

    let contact = state
        .contacts
        .update_owned(&user.username, id, &fields)
        .await?
        .ok_or_else(contact_not_found)?;
    info!("Updated contact {} for user: {}", id, user.username);

    Ok(DataResponse::new(contact.into()))
}
