//! Domain layer for the vehicle and property storefront.
//!
//! Holds the listing model, admin form parsing, catalog filtering, price
//! formatting and the [`backend::MarketplaceBackend`] contract that the
//! managed-backend client implements. Nothing in here performs I/O.

pub mod auth;
pub mod backend;
pub mod contact;
pub mod error;
pub mod filter;
pub mod form;
pub mod format;
pub mod listing;
pub mod roles;
pub mod types;
