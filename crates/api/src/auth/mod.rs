//! Authentication primitives.
//!
//! - [`jwt`] -- Validation of identity-provider access tokens.

pub mod jwt;
