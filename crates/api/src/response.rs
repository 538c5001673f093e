//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope. Mutations add a `message` the UI
//! shows as a notification.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "message": "..." }` envelope for successful mutations.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub data: T,
    pub message: &'static str,
}
