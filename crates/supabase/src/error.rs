//! Errors from the managed-backend client and their domain mapping.

use serde_json::Value;
use storefront_core::error::CoreError;

/// Postgres SQLSTATE for unique-constraint violations.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for insufficient privilege (row-level rule denial).
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Errors from the managed-backend HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message extracted from the error body.
        message: String,
        /// Machine-readable code (SQLSTATE or auth error code), if any.
        code: Option<String>,
    },

    /// A success response whose body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl SupabaseError {
    /// Build an [`SupabaseError::Api`] from a status and raw body.
    ///
    /// The REST surface reports `{ "message", "code" }`, the auth surface
    /// `{ "msg", "error_code" }` or `{ "error", "error_description" }`.
    /// Unparseable bodies are carried verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let message = field("message")
            .or_else(|| field("msg"))
            .or_else(|| field("error_description"))
            .or_else(|| field("error"))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                }
            });
        let code = field("error_code")
            .or_else(|| field("code"))
            .or_else(|| field("error"));

        Self::Api {
            status,
            message,
            code,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::UnexpectedResponse(_) => None,
        }
    }
}

impl From<SupabaseError> for CoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Api {
                status,
                message,
                code,
            } => match (status, code.as_deref()) {
                (_, Some(PG_UNIQUE_VIOLATION)) | (409, _) => CoreError::Conflict(message),
                (_, Some(PG_INSUFFICIENT_PRIVILEGE)) | (403, _) => CoreError::Forbidden(message),
                (401, _) => CoreError::Unauthorized(message),
                (400 | 422, _) => CoreError::Validation(message),
                _ => CoreError::Upstream(format!("backend returned {status}: {message}")),
            },
            SupabaseError::Request(err) => CoreError::Upstream(format!("backend unreachable: {err}")),
            SupabaseError::UnexpectedResponse(msg) => CoreError::Upstream(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_rest_error_body() {
        let err = SupabaseError::from_body(
            409,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null}"#,
        );
        assert_matches!(&err, SupabaseError::Api { code: Some(code), .. } if code == "23505");
        assert_matches!(CoreError::from(err), CoreError::Conflict(msg) if msg.starts_with("duplicate key"));
    }

    #[test]
    fn parses_auth_error_bodies() {
        let err = SupabaseError::from_body(
            400,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        assert_matches!(&err, SupabaseError::Api { message, code: Some(code), .. }
            if message == "Invalid login credentials" && code == "invalid_credentials");

        let legacy = SupabaseError::from_body(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#,
        );
        assert_matches!(legacy, SupabaseError::Api { message, .. } if message == "Invalid Refresh Token");
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        let err = SupabaseError::from_body(502, "Bad Gateway");
        assert_matches!(&err, SupabaseError::Api { message, code: None, .. } if message == "Bad Gateway");
        assert_matches!(CoreError::from(err), CoreError::Upstream(_));
    }

    #[test]
    fn row_rule_denial_maps_to_forbidden() {
        let err = SupabaseError::from_body(
            401,
            r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
        );
        assert_matches!(CoreError::from(err), CoreError::Forbidden(_));
    }

    #[test]
    fn auth_failures_map_to_unauthorized() {
        let err = SupabaseError::from_body(401, r#"{"msg":"invalid JWT"}"#);
        assert_matches!(CoreError::from(err), CoreError::Unauthorized(msg) if msg == "invalid JWT");
    }
}
