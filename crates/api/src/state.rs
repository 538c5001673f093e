use std::sync::Arc;

use storefront_core::backend::MarketplaceBackend;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Managed backend: auth, listings storage and the admin-status procedure.
    pub backend: Arc<dyn MarketplaceBackend>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
