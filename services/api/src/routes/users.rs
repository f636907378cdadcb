//! User handlers

use axum::extract::State;
use tokio::task;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    middleware::AuthUser,
    models::{
        DataResponse,
        user::{
            LoginRequest, NewUser, RegisterUserRequest, TokenResponse, UpdateUser,
            UpdateUserRequest, UserResponse,
        },
    },
    password::{hash_password, verify_password},
    state::AppState,
    validation,
};

// argon2 is CPU-bound; keep it off the async workers
async fn hash(password: String) -> ApiResult<String> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            ApiError::InternalServerError
        })?
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalServerError
        })
}

async fn verify(password_hash: String, password: String) -> ApiResult<bool> {
    task::spawn_blocking(move || verify_password(&password_hash, &password))
        .await
        .map_err(|e| {
            error!("Password verification task failed: {}", e);
            ApiError::InternalServerError
        })
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserRequest>,
) -> ApiResult<DataResponse<UserResponse>> {
    let registration = validation::validate_registration(&payload)?;
    info!("Registering user: {}", registration.username);

    let new_user = NewUser {
        password_hash: hash(registration.password).await?,
        username: registration.username,
        name: registration.name,
    };

    let user = state
        .users
        .create(&new_user)
        .await?
        .ok_or_else(|| ApiError::Conflict("Username already exists".to_string()))?;

    Ok(DataResponse::new(UserResponse::from(&user)))
}

/// Exchange credentials for a fresh session token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<DataResponse<TokenResponse>> {
    let credentials = validation::validate_login(&payload)?;
    info!("Login attempt for user: {}", credentials.username);

    let wrong_credentials = || ApiError::Unauthorized("Username or password wrong".to_string());

    let user = state
        .users
        .find_by_username(&credentials.username)
        .await?
        .ok_or_else(wrong_credentials)?;

    if !verify(user.password.clone(), credentials.password).await? {
        return Err(wrong_credentials());
    }

    let token = Uuid::new_v4().to_string();
    state.users.set_token(&user.username, &token).await?;

    Ok(DataResponse::new(TokenResponse { token }))
}

/// Profile of the authenticated user
pub async fn get_current(user: AuthUser) -> DataResponse<UserResponse> {
    DataResponse::new(UserResponse {
        username: user.username,
        name: user.name,
    })
}

/// Update name and/or password of the authenticated user
pub async fn update_current(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> ApiResult<DataResponse<UserResponse>> {
    let changes = validation::validate_user_update(&payload)?;
    info!("Updating profile of user: {}", user.username);

    let password_hash = match changes.password {
        Some(password) => Some(hash(password).await?),
        None => None,
    };
    let changes = UpdateUser {
        name: changes.name,
        password_hash,
    };

    let updated = state
        .users
        .update(&user.username, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("User is not found".to_string()))?;

    Ok(DataResponse::new(UserResponse::from(&updated)))
}

/// Invalidate the caller's session token
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<DataResponse<bool>> {
    info!("Logout request for user: {}", user.username);

    state.users.clear_token(&user.username).await?;

    Ok(DataResponse::new(true))
}
