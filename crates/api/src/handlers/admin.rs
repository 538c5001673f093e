//! Handlers for the back-office `/admin` resource.
//!
//! Every handler takes [`RequireAdmin`], so none of them runs until the
//! backend has confirmed the caller's admin flag. Mutations forward the
//! caller's access token so the backend's row rules apply.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_core::auth::display_name;
use storefront_core::error::CoreError;
use storefront_core::filter::{CatalogParams, ListingQuery};
use storefront_core::form::ListingForm;
use storefront_core::listing::{DashboardStats, Listing};
use storefront_core::types::ListingId;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ActionResponse, DataResponse};
use crate::state::AppState;

/// Dashboard header data.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    /// Name to greet the admin by.
    pub display_name: String,
    pub stats: DashboardStats,
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let token = admin.access_token.as_str();
    let listings = state
        .backend
        .list_listings(&ListingQuery::back_office(), Some(token))
        .await?;
    let profile = state.backend.get_profile(admin.user_id, token).await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            display_name: display_name(&admin.identity, profile.as_ref()),
            stats: DashboardStats::from_listings(&listings),
        },
    }))
}

/// GET /api/v1/admin/listings
///
/// Every listing regardless of status, newest first. Accepts the catalog
/// filters plus `featured=true`.
pub async fn list_listings(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    let query = params.apply_to(ListingQuery::back_office())?;
    let listings = state
        .backend
        .list_listings(&query, Some(&admin.access_token))
        .await?;
    Ok(Json(DataResponse { data: listings }))
}

/// POST /api/v1/admin/listings
///
/// Create a listing owned by the calling admin.
pub async fn create_listing(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(form): Json<ListingForm>,
) -> AppResult<(StatusCode, Json<ActionResponse<Listing>>)> {
    let new_listing = form.into_draft()?.into_new_listing(admin.user_id);
    let listing = state
        .backend
        .insert_listing(&new_listing, &admin.access_token)
        .await?;

    tracing::info!(listing_id = %listing.id, user_id = %admin.user_id, "Listing created");

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse {
            data: listing,
            message: "Listing created successfully!",
        }),
    ))
}

/// PUT /api/v1/admin/listings/{id}
///
/// Update a listing from the submitted form. Optional fields the form omits
/// (status, images, currency and the like) keep their stored values.
pub async fn update_listing(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ListingId>,
    Json(form): Json<ListingForm>,
) -> AppResult<Json<ActionResponse<Listing>>> {
    let patch = form.into_patch()?;
    let listing = state
        .backend
        .update_listing(id, &patch, &admin.access_token)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(listing_id = %id, user_id = %admin.user_id, "Listing updated");

    Ok(Json(ActionResponse {
        data: listing,
        message: "Listing updated successfully!",
    }))
}

/// DELETE /api/v1/admin/listings/{id}
pub async fn delete_listing(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ListingId>,
) -> AppResult<StatusCode> {
    let deleted = state
        .backend
        .delete_listing(id, &admin.access_token)
        .await?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!(listing_id = %id, user_id = %admin.user_id, "Listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: ListingId) -> CoreError {
    CoreError::NotFound {
        entity: "Listing",
        id: id.to_string(),
    }
}
