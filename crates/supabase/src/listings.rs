//! Table access for `listings` and `profiles`.

use reqwest::Method;
use storefront_core::auth::Profile;
use storefront_core::filter::ListingQuery;
use storefront_core::listing::{Listing, ListingPatch, NewListing};
use storefront_core::types::{ListingId, UserId};

use crate::client::{SupabaseClient, PREFER_HEADER, RETURN_REPRESENTATION};
use crate::error::SupabaseError;
use crate::query::listing_params;

const LISTINGS_TABLE: &str = "listings";
const PROFILES_TABLE: &str = "profiles";

impl SupabaseClient {
    /// Fetch the listings selected by `query`, in the query's order.
    pub async fn list_listings(
        &self,
        query: &ListingQuery,
        token: Option<&str>,
    ) -> Result<Vec<Listing>, SupabaseError> {
        let response = self
            .request(Method::GET, self.rest_url(LISTINGS_TABLE), token)
            .query(&listing_params(query))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch one listing by id.
    pub async fn get_listing(
        &self,
        id: ListingId,
        token: Option<&str>,
    ) -> Result<Option<Listing>, SupabaseError> {
        let response = self
            .request(Method::GET, self.rest_url(LISTINGS_TABLE), token)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .send()
            .await?;

        let rows: Vec<Listing> = Self::parse_response(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a listing and return the stored row.
    pub async fn insert_listing(
        &self,
        listing: &NewListing,
        token: &str,
    ) -> Result<Listing, SupabaseError> {
        let response = self
            .request(Method::POST, self.rest_url(LISTINGS_TABLE), Some(token))
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(listing)
            .send()
            .await?;

        let rows: Vec<Listing> = Self::parse_response(response).await?;
        rows.into_iter().next().ok_or_else(|| {
            SupabaseError::UnexpectedResponse("insert returned no rows".to_string())
        })
    }

    /// Apply `patch` to the listing with `id`. `None` when no row matched.
    pub async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
        token: &str,
    ) -> Result<Option<Listing>, SupabaseError> {
        let response = self
            .request(Method::PATCH, self.rest_url(LISTINGS_TABLE), Some(token))
            .query(&[("id", format!("eq.{id}"))])
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(patch)
            .send()
            .await?;

        let rows: Vec<Listing> = Self::parse_response(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete the listing with `id`. Returns whether a row was removed.
    pub async fn delete_listing(&self, id: ListingId, token: &str) -> Result<bool, SupabaseError> {
        let response = self
            .request(Method::DELETE, self.rest_url(LISTINGS_TABLE), Some(token))
            .query(&[("id", format!("eq.{id}"))])
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = Self::parse_response(response).await?;
        Ok(!rows.is_empty())
    }

    /// Fetch the profile row for `user_id`, if one exists.
    pub async fn get_profile(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<Option<Profile>, SupabaseError> {
        let response = self
            .request(Method::GET, self.rest_url(PROFILES_TABLE), Some(token))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{user_id}"))])
            .send()
            .await?;

        let rows: Vec<Profile> = Self::parse_response(response).await?;
        Ok(rows.into_iter().next())
    }
}
