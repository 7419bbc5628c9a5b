use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::{ok_message, AppJson};
use crate::{
    error::{AppError, AppResult},
    models::{Credential, LoginRequest, PasswordReset, UsernameChange},
    password, AppState,
};

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let rejected = || AppError::Unauthorized("Invalid username or password".to_string());

    let Some(candidate) = req.password else {
        return Err(rejected());
    };
    let stored: Vec<String> = state
        .store
        .find_credentials(req.username.as_deref())
        .await?
        .into_iter()
        .filter_map(|c| c.password)
        .collect();
    if !password::verify_any_blocking(candidate, stored).await? {
        return Err(rejected());
    }

    info!(username = req.username.as_deref().unwrap_or_default(), "Login succeeded");
    Ok(ok_message("Login successful"))
}

/// Resets a password knowing only the username.
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<PasswordReset>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let hash = match req.new_password {
        Some(plain) => Some(password::hash_password_blocking(plain).await?),
        None => None,
    };

    let updated = state
        .store
        .set_password(req.username.as_deref(), hash.as_deref())
        .await?;
    if updated == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    info!(
        username = req.username.as_deref().unwrap_or_default(),
        updated,
        "Password reset"
    );
    Ok(ok_message("Password updated successfully"))
}

pub async fn change_username(
    State(state): State<AppState>,
    AppJson(req): AppJson<UsernameChange>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let updated = state
        .store
        .rename_user(req.old_username.as_deref(), req.new_username.as_deref())
        .await?;
    if updated == 0 {
        return Err(AppError::NotFound("Old username not found".to_string()));
    }

    info!(
        old_username = req.old_username.as_deref().unwrap_or_default(),
        new_username = req.new_username.as_deref().unwrap_or_default(),
        "Username changed"
    );
    Ok(ok_message("Username updated successfully"))
}

/// Dumps the credential table. Answers 404 unless `EXPOSE_CREDENTIALS` is on.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<Credential>>> {
    if !state.expose_credentials {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let rows = state.store.list_credentials().await?;
    info!(count = rows.len(), "Listed credentials");
    Ok(Json(rows))
}
