use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::{extractors::CurrentUser, password::hash_password},
    error::{conflict_on_unique, ApiError},
    state::AppState,
    users::{
        dto::{is_valid_email, CreateUserRequest, PublicUser, UpdateUserRequest},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(register))
        .route("/user/:email", put(update_user))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("invalid email".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("password too short".into()));
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    // The primary key enforces uniqueness; no check-then-act window.
    let user = User::create(&state.db, &payload.email, &payload.name, &hash)
        .await
        .map_err(|e| conflict_on_unique(e, "user already exists"))?;

    info!(email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(PublicUser {
            email: user.email,
            name: user.name,
        }),
    ))
}

#[instrument(skip(state, current, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(email): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = email.trim().to_lowercase();

    if User::find_by_email(&state.db, &email)
        .await
        .map_err(ApiError::Internal)?
        .is_none()
    {
        return Err(ApiError::NotFound(format!("user {} not found", email)));
    }

    if current.email != email {
        warn!(requester = %current.email, target = %email, "user update denied");
        return Err(ApiError::Forbidden("can only update your own account".into()));
    }

    if let Some(password) = &payload.password {
        if password.len() < 8 {
            return Err(ApiError::Validation("password too short".into()));
        }
    }

    let password_hash = match &payload.password {
        Some(p) => Some(hash_password(p).map_err(ApiError::Internal)?),
        None => None,
    };

    User::update(
        &state.db,
        &email,
        payload.name.as_deref(),
        password_hash.as_deref(),
    )
    .await
    .map_err(ApiError::Internal)?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", email)))?;

    info!(email = %email, "user updated");
    Ok(Json(json!({ "detail": "user updated" })))
}
