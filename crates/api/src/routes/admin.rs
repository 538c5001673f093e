//! Route definitions for the back office.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin flag.
///
/// ```text
/// GET    /dashboard       -> dashboard
/// GET    /listings        -> list_listings
/// POST   /listings        -> create_listing
/// PUT    /listings/{id}   -> update_listing
/// DELETE /listings/{id}   -> delete_listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route(
            "/listings",
            get(admin::list_listings).post(admin::create_listing),
        )
        .route(
            "/listings/{id}",
            put(admin::update_listing).delete(admin::delete_listing),
        )
}
