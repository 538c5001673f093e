//! Shared HTTP plumbing for the managed backend.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::SupabaseConfig;
use crate::error::SupabaseError;

/// Header carrying the public API key on every request.
const API_KEY_HEADER: &str = "apikey";

/// Header selecting what mutations return.
pub(crate) const PREFER_HEADER: &str = "Prefer";

/// Ask mutations to echo the affected rows.
pub(crate) const RETURN_REPRESENTATION: &str = "return=representation";

/// HTTP client for one managed-backend project.
///
/// Cheap to clone: the inner [`reqwest::Client`] is reference counted.
#[derive(Clone)]
pub struct SupabaseClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: SupabaseConfig,
}

impl SupabaseClient {
    /// Create a new client for the given project.
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool and timeouts).
    pub fn with_client(http: reqwest::Client, config: SupabaseConfig) -> Self {
        Self { http, config }
    }

    // ---- URL helpers ----

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    pub(crate) fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{function}", self.config.url)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url)
    }

    // ---- request helpers ----

    /// Start a request carrying the API key and a bearer token: the user's
    /// access token when given, otherwise the anon key.
    pub(crate) fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        tracing::debug!(%method, %url, authenticated = token.is_some(), "Backend request");
        self.http
            .request(method, url)
            .headers(self.base_headers(token))
    }

    fn base_headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.config.anon_key) {
            headers.insert(API_KEY_HEADER, key);
        }
        let bearer = token.unwrap_or(&self.config.anon_key);
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {bearer}")) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    // ---- response helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SupabaseError::Api`]
    /// built from the error body on failure.
    pub(crate) async fn ensure_success(response: Response) -> Result<Response, SupabaseError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), %body, "Backend error response");
            return Err(SupabaseError::from_body(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, SupabaseError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| SupabaseError::UnexpectedResponse(format!("invalid JSON body: {e}")))
    }

    /// Assert the response has a success status code, discarding the body.
    pub(crate) async fn check_status(response: Response) -> Result<(), SupabaseError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
