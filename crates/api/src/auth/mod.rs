//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and the password strength rule.
//! - [`jwt`] -- access tokens carrying the role claim.
//! - [`token`] -- opaque secrets for refresh sessions and invitation links.

pub mod jwt;
pub mod password;
pub mod token;
