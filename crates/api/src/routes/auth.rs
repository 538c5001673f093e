//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /sign-in   -> sign_in
/// POST /sign-up   -> sign_up
/// POST /refresh   -> refresh
/// POST /sign-out  -> sign_out (requires auth)
/// GET  /session   -> session (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .route("/refresh", post(auth::refresh))
        .route("/sign-out", post(auth::sign_out))
        .route("/session", get(auth::session))
}
