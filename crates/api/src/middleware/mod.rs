//! Request extractors enforcing authentication and role checks.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer access token.
//! - [`rbac::RequireAuth`] -- any signed-in user.
//! - [`rbac::RequireEditor`] -- editors and admins (content management).
//! - [`rbac::RequireAdmin`] -- admins only (users, roles, site settings).

pub mod auth;
pub mod rbac;
