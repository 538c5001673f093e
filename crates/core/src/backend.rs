//! The managed-backend contract.
//!
//! Persistence, authentication and the admin-status lookup all live in an
//! external hosted service. Handlers talk to it only through this trait so the
//! HTTP layer can be exercised against an in-memory implementation.

use async_trait::async_trait;

use crate::auth::{Identity, Profile, Session, SignUpOutcome};
use crate::error::CoreError;
use crate::filter::ListingQuery;
use crate::listing::{Listing, ListingPatch, NewListing};
use crate::types::{ListingId, UserId};

/// Operations the storefront needs from the managed backend.
///
/// `token` is the caller's access token. Anonymous reads pass `None` and run
/// with the public key's privileges; the backend's row-level rules decide
/// what each caller may see or change.
#[async_trait]
pub trait MarketplaceBackend: Send + Sync {
    // --- Authentication ---

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignUpOutcome, CoreError>;

    async fn sign_out(&self, token: &str) -> Result<(), CoreError>;

    /// Resolve an access token to the account it belongs to.
    async fn get_user(&self, token: &str) -> Result<Identity, CoreError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, CoreError>;

    // --- Authorization ---

    /// The caller's administrative-privilege flag.
    async fn is_admin(&self, token: &str) -> Result<bool, CoreError>;

    async fn get_profile(&self, user_id: UserId, token: &str)
        -> Result<Option<Profile>, CoreError>;

    // --- Listings ---

    async fn list_listings(
        &self,
        query: &ListingQuery,
        token: Option<&str>,
    ) -> Result<Vec<Listing>, CoreError>;

    async fn get_listing(
        &self,
        id: ListingId,
        token: Option<&str>,
    ) -> Result<Option<Listing>, CoreError>;

    async fn insert_listing(&self, listing: &NewListing, token: &str) -> Result<Listing, CoreError>;

    /// Returns `None` when no row with `id` exists.
    async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
        token: &str,
    ) -> Result<Option<Listing>, CoreError>;

    /// Returns whether a row was deleted.
    async fn delete_listing(&self, id: ListingId, token: &str) -> Result<bool, CoreError>;
}
