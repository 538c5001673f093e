//! Handlers for the `/auth` resource (sign-in, sign-up, refresh, sign-out,
//! session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::auth::{
    display_name, Credentials, Identity, Profile, Session, SignUpOutcome, SignUpRequest,
};
use storefront_core::error::CoreError;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{ActionResponse, DataResponse};
use crate::state::AppState;

/// Minimum password length accepted by the backend's auth service.
const MIN_PASSWORD_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The signed-in account as the UI needs it.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: Identity,
    pub profile: Option<Profile>,
    pub is_admin: bool,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-in
///
/// Exchange e-mail and password for a session.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> AppResult<Json<ActionResponse<Session>>> {
    let email = input.email.trim();
    if email.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("Please fill in all fields".into()).into());
    }

    let session = state.backend.sign_in(email, &input.password).await?;
    tracing::info!(user_id = %session.user.id, "User signed in");

    Ok(Json(ActionResponse {
        data: session,
        message: "Logged in successfully!",
    }))
}

/// POST /api/v1/auth/sign-up
///
/// Register a new account. When the backend requires e-mail confirmation the
/// response carries no session.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<ActionResponse<SignUpOutcome>>)> {
    let email = input.email.trim();
    if email.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("Please fill in all fields".into()).into());
    }
    if !email.contains('@') {
        return Err(CoreError::Validation("Please enter a valid email address".into()).into());
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }
    let full_name = input
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let outcome = state.backend.sign_up(email, &input.password, full_name).await?;
    tracing::info!(user_id = %outcome.user.id, confirmed = outcome.session.is_some(), "User signed up");

    let message = if outcome.session.is_some() {
        "Account created successfully!"
    } else {
        "Account created! Please check your email to confirm your account."
    };
    Ok((
        StatusCode::CREATED,
        Json(ActionResponse {
            data: outcome,
            message,
        }),
    ))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new session.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<Session>>> {
    if input.refresh_token.trim().is_empty() {
        return Err(CoreError::Validation("refresh_token is required".into()).into());
    }
    let session = state.backend.refresh_session(input.refresh_token.trim()).await?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/auth/sign-out
///
/// Revoke the caller's session.
pub async fn sign_out(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    state.backend.sign_out(&user.access_token).await?;
    tracing::info!(user_id = %user.user_id, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// The caller's account, profile and admin flag.
pub async fn session(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let profile = state
        .backend
        .get_profile(user.user_id, &user.access_token)
        .await?;
    let is_admin = state.backend.is_admin(&user.access_token).await?;
    let display_name = display_name(&user.identity, profile.as_ref());

    Ok(Json(DataResponse {
        data: SessionInfo {
            user: user.identity,
            profile,
            is_admin,
            display_name,
        },
    }))
}
