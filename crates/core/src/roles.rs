//! Well-known profile role names.
//!
//! These must match the `profiles.role` check constraint in the managed backend.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
