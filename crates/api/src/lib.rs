//! Rouge-Cardinal API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! invitation saga, media storage) so integration tests and the binary
//! entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod image_check;
pub mod invitation;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
