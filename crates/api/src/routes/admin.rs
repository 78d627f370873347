//! Route definitions for back-office settings: users, display toggles and
//! the contact inbox.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{contact, display_toggles, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                          -> list_users (admin)
/// POST   /users/invite                   -> invite_user (admin)
/// GET    /users/{id}                     -> get_user (admin)
/// PUT    /users/{id}                     -> update_user (admin)
/// DELETE /users/{id}                     -> delete_user (admin)
/// POST   /users/{id}/deactivate          -> deactivate_user (admin)
///
/// GET    /display-toggles                -> list_toggles (admin)
/// GET    /display-toggles/{key}          -> get_toggle (admin)
/// PUT    /display-toggles/{key}          -> update_toggle (admin)
///
/// GET    /contact-messages               -> list_messages
/// POST   /contact-messages/{id}/handled  -> mark_handled
/// DELETE /contact-messages/{id}          -> delete_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/invite", post(users::invite_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/deactivate", post(users::deactivate_user))
        .route("/display-toggles", get(display_toggles::list_toggles))
        .route(
            "/display-toggles/{key}",
            get(display_toggles::get_toggle).put(display_toggles::update_toggle),
        )
        .route("/contact-messages", get(contact::list_messages))
        .route("/contact-messages/{id}", delete(contact::delete_message))
        .route("/contact-messages/{id}/handled", post(contact::mark_handled))
}
