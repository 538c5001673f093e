//! Route definitions for the public catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET /       -> list_listings
/// GET /{id}   -> get_listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_listings))
        .route("/{id}", get(catalog::get_listing))
}
