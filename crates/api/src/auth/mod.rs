//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access tokens and the token-backed owner resolver.

pub mod jwt;
pub mod password;
