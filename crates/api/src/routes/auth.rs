//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login               -> login
/// POST /refresh             -> refresh
/// POST /logout              -> logout (requires auth)
/// GET  /me                  -> me (requires auth)
/// POST /invitations/accept  -> accept_invitation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/invitations/accept", post(auth::accept_invitation))
}
