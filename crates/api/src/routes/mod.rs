pub mod admin;
pub mod auth;
pub mod health;
pub mod listings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-in                     sign in (public)
/// /auth/sign-up                     sign up (public)
/// /auth/refresh                     refresh session (public)
/// /auth/sign-out                    sign out (requires auth)
/// /auth/session                     current account (requires auth)
///
/// /listings                         catalog (public)
/// /listings/{id}                    listing detail (public)
///
/// /admin/dashboard                  stats (admin only)
/// /admin/listings                   list, create (admin only)
/// /admin/listings/{id}              update, delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/listings", listings::router())
        .nest("/admin", admin::router())
}
