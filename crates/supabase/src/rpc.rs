//! Remote procedure calls.

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::client::SupabaseClient;
use crate::error::SupabaseError;

/// Returns the calling user's administrative-privilege flag.
pub const ADMIN_STATUS_FN: &str = "get_current_user_admin_status";

impl SupabaseClient {
    /// Invoke a remote procedure with named arguments.
    pub async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        args: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<T, SupabaseError> {
        let response = self
            .request(Method::POST, self.rpc_url(function), token)
            .json(args)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Whether the holder of `token` is an administrator. A `null` result
    /// (no profile row) counts as not admin.
    pub async fn is_admin(&self, token: &str) -> Result<bool, SupabaseError> {
        let flag: Option<bool> = self
            .rpc(ADMIN_STATUS_FN, &serde_json::json!({}), Some(token))
            .await?;
        Ok(flag.unwrap_or(false))
    }
}
