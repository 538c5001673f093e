//! Auth surface: password sessions and current-user lookup.

use reqwest::Method;
use serde_json::{json, Value};
use storefront_core::auth::{Identity, Session, SignUpOutcome};

use crate::client::SupabaseClient;
use crate::error::SupabaseError;

impl SupabaseClient {
    /// Exchange e-mail and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SupabaseError> {
        let response = self
            .request(Method::POST, self.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Register a new account. `full_name` is stored in the user metadata.
    ///
    /// Projects that require e-mail confirmation answer with the bare user
    /// object; projects that auto-confirm answer with a full session.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignUpOutcome, SupabaseError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = full_name {
            body["data"] = json!({ "full_name": name });
        }

        let response = self
            .request(Method::POST, self.auth_url("signup"), None)
            .json(&body)
            .send()
            .await?;

        let value: Value = Self::parse_response(response).await?;
        parse_sign_up(value)
    }

    /// Revoke the session behind `token`.
    pub async fn sign_out(&self, token: &str) -> Result<(), SupabaseError> {
        let response = self
            .request(Method::POST, self.auth_url("logout"), Some(token))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Resolve `token` to the account it was issued for.
    pub async fn get_user(&self, token: &str) -> Result<Identity, SupabaseError> {
        let response = self
            .request(Method::GET, self.auth_url("user"), Some(token))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Trade a refresh token for a new session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, SupabaseError> {
        let response = self
            .request(Method::POST, self.auth_url("token"), None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}

fn parse_sign_up(value: Value) -> Result<SignUpOutcome, SupabaseError> {
    let invalid = |e: serde_json::Error| {
        SupabaseError::UnexpectedResponse(format!("invalid sign-up response: {e}"))
    };

    if value.get("access_token").is_some() {
        let session: Session = serde_json::from_value(value).map_err(invalid)?;
        return Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user: Identity = serde_json::from_value(value).map_err(invalid)?;
    Ok(SignUpOutcome {
        user,
        session: None,
    })
}
