//! Bearer-token claim inspection.
//!
//! Access tokens are issued and signed by the managed backend's auth service;
//! this server never holds the signing secret. The claims are read without
//! signature verification purely to fail fast on garbage or expired tokens.
//! The authoritative check is the backend's `/user` lookup in
//! [`crate::middleware::auth::AuthUser`].

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use storefront_core::types::UserId;

/// Claims read from a backend-issued access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account id.
    pub sub: UserId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
    /// Database role the token runs as (e.g. `"authenticated"`).
    #[serde(default)]
    pub role: Option<String>,
}

/// Decode `token` and check its expiry, without verifying the signature.
///
/// Returns an error if the token is not a well-formed JWT, lacks `sub` or
/// `exp`, or has expired.
pub fn inspect_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
