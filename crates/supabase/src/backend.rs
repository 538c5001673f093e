//! [`MarketplaceBackend`] implementation over the REST client.

use async_trait::async_trait;
use storefront_core::auth::{Identity, Profile, Session, SignUpOutcome};
use storefront_core::backend::MarketplaceBackend;
use storefront_core::error::CoreError;
use storefront_core::filter::ListingQuery;
use storefront_core::listing::{Listing, ListingPatch, NewListing};
use storefront_core::types::{ListingId, UserId};

use crate::client::SupabaseClient;
use crate::error::SupabaseError;

#[async_trait]
impl MarketplaceBackend for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        self.sign_in_with_password(email, password)
            .await
            .map_err(credentials_error)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignUpOutcome, CoreError> {
        Ok(SupabaseClient::sign_up(self, email, password, full_name).await?)
    }

    async fn sign_out(&self, token: &str) -> Result<(), CoreError> {
        Ok(SupabaseClient::sign_out(self, token).await?)
    }

    async fn get_user(&self, token: &str) -> Result<Identity, CoreError> {
        SupabaseClient::get_user(self, token)
            .await
            .map_err(session_error)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, CoreError> {
        SupabaseClient::refresh_session(self, refresh_token)
            .await
            .map_err(session_error)
    }

    async fn is_admin(&self, token: &str) -> Result<bool, CoreError> {
        Ok(SupabaseClient::is_admin(self, token).await?)
    }

    async fn get_profile(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<Option<Profile>, CoreError> {
        Ok(SupabaseClient::get_profile(self, user_id, token).await?)
    }

    async fn list_listings(
        &self,
        query: &ListingQuery,
        token: Option<&str>,
    ) -> Result<Vec<Listing>, CoreError> {
        Ok(SupabaseClient::list_listings(self, query, token).await?)
    }

    async fn get_listing(
        &self,
        id: ListingId,
        token: Option<&str>,
    ) -> Result<Option<Listing>, CoreError> {
        Ok(SupabaseClient::get_listing(self, id, token).await?)
    }

    async fn insert_listing(&self, listing: &NewListing, token: &str) -> Result<Listing, CoreError> {
        Ok(SupabaseClient::insert_listing(self, listing, token).await?)
    }

    async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
        token: &str,
    ) -> Result<Option<Listing>, CoreError> {
        Ok(SupabaseClient::update_listing(self, id, patch, token).await?)
    }

    async fn delete_listing(&self, id: ListingId, token: &str) -> Result<bool, CoreError> {
        Ok(SupabaseClient::delete_listing(self, id, token).await?)
    }
}

/// Bad credentials come back as 400; report them as an auth failure rather
/// than a validation problem.
fn credentials_error(err: SupabaseError) -> CoreError {
    match err {
        SupabaseError::Api {
            status: 400 | 401,
            message,
            ..
        } => CoreError::Unauthorized(message),
        other => other.into(),
    }
}

/// A rejected access or refresh token means the session is gone.
fn session_error(err: SupabaseError) -> CoreError {
    match err {
        SupabaseError::Api {
            status: 400 | 401 | 403,
            message,
            ..
        } => CoreError::Unauthorized(message),
        other => other.into(),
    }
}
