//! Admin gating.
//!
//! The backend's admin-status procedure is the only source of truth for
//! back-office access. It is evaluated on every admin request; nothing in the
//! URL, headers or client state can grant access.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an authenticated user whose admin flag is set. Rejects with
/// 401 when not signed in and 403 when signed in without the flag.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !state.backend.is_admin(&user.access_token).await? {
            tracing::warn!(user_id = %user.user_id, "Admin access denied");
            return Err(AppError::Core(CoreError::Forbidden(
                "You don't have admin privileges.".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
