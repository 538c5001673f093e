//! Handlers for the public `/listings` catalog.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use storefront_core::contact::{enquiry_message, whatsapp_link};
use storefront_core::error::CoreError;
use storefront_core::filter::{CatalogParams, ListingQuery};
use storefront_core::format::format_price;
use storefront_core::listing::{partition_featured, Listing, ListingStatus};
use storefront_core::types::ListingId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A listing as shown on a catalog card.
#[derive(Debug, Serialize)]
pub struct ListingCard {
    #[serde(flatten)]
    pub listing: Listing,
    /// e.g. `"KSH 3,200,000"`.
    pub formatted_price: String,
}

impl From<Listing> for ListingCard {
    fn from(listing: Listing) -> Self {
        let formatted_price = format_price(listing.price, &listing.currency);
        Self {
            listing,
            formatted_price,
        }
    }
}

/// One page of catalog results, featured listings first.
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub total: usize,
    pub featured: Vec<ListingCard>,
    pub regular: Vec<ListingCard>,
}

/// A single listing with its contact details.
#[derive(Debug, Serialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub card: ListingCard,
    /// Pre-filled WhatsApp chat link, absent if the number has no digits.
    pub whatsapp_link: Option<String>,
    pub enquiry_message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/listings
///
/// Active listings matching the optional `type`, `location`, `q`,
/// `price_range` / `min_price` / `max_price` filters.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<DataResponse<CatalogPage>>> {
    let query = params.apply_to(ListingQuery::catalog())?;
    let listings = state.backend.list_listings(&query, None).await?;

    let total = listings.len();
    let (featured, regular) = partition_featured(listings);
    Ok(Json(DataResponse {
        data: CatalogPage {
            total,
            featured: featured.into_iter().map(ListingCard::from).collect(),
            regular: regular.into_iter().map(ListingCard::from).collect(),
        },
    }))
}

/// GET /api/v1/listings/{id}
///
/// Sold and inactive listings are hidden from the public catalog.
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<ListingId>,
) -> AppResult<Json<DataResponse<ListingDetail>>> {
    let listing = state
        .backend
        .get_listing(id, None)
        .await?
        .filter(|l| l.status == ListingStatus::Active)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Listing",
            id: id.to_string(),
        })?;

    let whatsapp_link = whatsapp_link(&listing);
    let enquiry_message = enquiry_message(&listing);
    Ok(Json(DataResponse {
        data: ListingDetail {
            card: listing.into(),
            whatsapp_link,
            enquiry_message,
        },
    }))
}
