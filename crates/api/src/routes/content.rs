//! Route definitions for editorial content: venues, shows, events and press.

use axum::routing::get;
use axum::Router;

use crate::handlers::{events, press, shows, venues};
use crate::state::AppState;

/// Routes mounted at `/admin/venues`.
pub fn venues_router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list_venues).post(venues::create_venue))
        .route(
            "/{id}",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
}

/// Routes mounted at `/admin/shows`.
///
/// ```text
/// GET    /?status=  -> list_shows
/// POST   /          -> create_show
/// GET    /{id}      -> get_show
/// PUT    /{id}      -> update_show
/// DELETE /{id}      -> delete_show
/// ```
pub fn shows_router() -> Router<AppState> {
    Router::new()
        .route("/", get(shows::list_shows).post(shows::create_show))
        .route(
            "/{id}",
            get(shows::get_show)
                .put(shows::update_show)
                .delete(shows::delete_show),
        )
}

/// Routes mounted at `/admin/events`.
pub fn events_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}

/// Routes mounted at `/admin/press-releases`.
pub fn press_releases_router() -> Router<AppState> {
    Router::new()
        .route("/", get(press::list_releases).post(press::create_release))
        .route(
            "/{id}",
            get(press::get_release)
                .put(press::update_release)
                .delete(press::delete_release),
        )
}

/// Routes mounted at `/admin/press-articles`.
pub fn press_articles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(press::list_articles).post(press::create_article))
        .route(
            "/{id}",
            get(press::get_article)
                .put(press::update_article)
                .delete(press::delete_article),
        )
}

/// Routes mounted at `/admin/press-contacts`.
pub fn press_contacts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(press::list_contacts).post(press::create_contact))
        .route(
            "/{id}",
            get(press::get_contact)
                .put(press::update_contact)
                .delete(press::delete_contact),
        )
}
