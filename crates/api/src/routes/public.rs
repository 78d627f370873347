//! Route definitions for the unauthenticated `/public` tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET  /home                    -> home
/// GET  /shows                   -> list_shows
/// GET  /shows/{slug}            -> get_show
/// GET  /agenda                  -> agenda
/// GET  /press                   -> press
/// GET  /company                 -> company
/// GET  /display-toggles         -> toggle_map
/// POST /contact                 -> submit_contact
/// POST /newsletter              -> subscribe
/// POST /newsletter/unsubscribe  -> unsubscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(public::home))
        .route("/shows", get(public::list_shows))
        .route("/shows/{slug}", get(public::get_show))
        .route("/agenda", get(public::agenda))
        .route("/press", get(public::press))
        .route("/company", get(public::company))
        .route("/display-toggles", get(public::toggle_map))
        .route("/contact", post(public::submit_contact))
        .route("/newsletter", post(public::subscribe))
        .route("/newsletter/unsubscribe", post(public::unsubscribe))
}
