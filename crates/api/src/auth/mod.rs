//! Access-token handling.
//!
//! - [`token`] -- Unverified claim inspection used to reject malformed or
//!   expired bearer tokens before calling the managed backend.

pub mod token;
