//! Identity, session and profile types returned by the managed backend.

use serde::{Deserialize, Serialize};

use crate::roles::{ROLE_ADMIN, ROLE_USER};
use crate::types::{Timestamp, UserId};

/// An authenticated account as reported by the backend's auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Identity {
    /// `full_name` from sign-up metadata, if the user supplied one.
    pub fn full_name(&self) -> Option<&str> {
        self.user_metadata
            .get("full_name")
            .and_then(serde_json::Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// Tokens issued on sign-in or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: Identity,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Outcome of a sign-up. When the backend requires e-mail confirmation no
/// session is issued yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpOutcome {
    pub user: Identity,
    pub session: Option<Session>,
}

/// E-mail and password pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Profile role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }
}

/// A row from the `profiles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// The name to greet a user by: profile name, then sign-up name, then e-mail.
pub fn display_name(identity: &Identity, profile: Option<&Profile>) -> String {
    profile
        .and_then(|p| p.full_name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .or_else(|| identity.full_name())
        .or(identity.email.as_deref())
        .unwrap_or("there")
        .to_string()
}
