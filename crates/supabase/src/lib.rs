//! REST client for the hosted Postgres + auth service backing the storefront.
//!
//! Wraps the service's three HTTP surfaces with [`reqwest`]:
//!
//! - `/auth/v1/*` -- password sign-in, sign-up, sign-out, token refresh and
//!   current-user lookup ([`auth`]),
//! - `/rest/v1/<table>` -- filtered reads and writes on `listings` and
//!   `profiles` ([`listings`], [`query`]),
//! - `/rest/v1/rpc/<fn>` -- remote procedures such as the admin-status check
//!   ([`rpc`]).
//!
//! [`SupabaseClient`] implements [`storefront_core::backend::MarketplaceBackend`].

pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod listings;
pub mod query;
pub mod rpc;

pub use client::SupabaseClient;
pub use config::{ConfigError, SupabaseConfig};
pub use error::SupabaseError;
