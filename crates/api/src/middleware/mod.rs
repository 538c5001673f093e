//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the signed-in account from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Additionally requires the backend admin flag.

pub mod auth;
pub mod rbac;
