//! Request handlers.
//!
//! Each submodule provides async handler functions for one area of the API.
//! Handlers delegate to the [`MarketplaceBackend`] in [`AppState`] and map
//! errors via [`AppError`].
//!
//! [`MarketplaceBackend`]: storefront_core::backend::MarketplaceBackend
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
