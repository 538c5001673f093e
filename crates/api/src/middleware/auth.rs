//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::auth::Identity;
use storefront_core::error::CoreError;
use storefront_core::types::UserId;

use crate::auth::token::inspect_token;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in account extracted from the `Authorization: Bearer` header.
///
/// The token is first inspected locally (shape and expiry), then confirmed
/// with the managed backend, which also returns the account record.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
    /// Account record as reported by the backend.
    pub identity: Identity,
    /// The raw access token, forwarded on backend calls made for this user.
    pub access_token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = inspect_token(token).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let identity = state.backend.get_user(token).await?;
        if identity.id != claims.sub {
            tracing::warn!(sub = %claims.sub, user_id = %identity.id, "Token subject mismatch");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired token".into(),
            )));
        }

        Ok(AuthUser {
            user_id: identity.id,
            email: identity.email.clone(),
            identity,
            access_token: token.to_string(),
        })
    }
}
