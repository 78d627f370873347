pub mod admin;
pub mod auth;
pub mod content;
pub mod health;
pub mod media;
pub mod ordered;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
/// /auth/refresh                              refresh (public)
/// /auth/logout                               logout (requires auth)
/// /auth/me                                   caller profile (requires auth)
/// /auth/invitations/accept                   set password from invite token
///
/// /public/home                               toggle-gated home sections
/// /public/shows, /public/shows/{slug}        published public shows
/// /public/agenda                             upcoming dates
/// /public/press                              releases, articles, media kit flag
/// /public/company                            sections and team
/// /public/display-toggles                    {key: enabled}
/// /public/contact                            contact form (POST)
/// /public/newsletter[/unsubscribe]           newsletter (POST)
///
/// /admin/users                               list (admin)
/// /admin/users/invite                        invitation saga (admin)
/// /admin/users/{id}                          get, update, delete (admin)
/// /admin/users/{id}/deactivate               deactivate (admin)
/// /admin/display-toggles[/{key}]             list, get, update (admin)
/// /admin/contact-messages[/{id}]             inbox (editor)
///
/// /admin/venues, /admin/shows, /admin/events CRUD (editor)
/// /admin/press-{releases|articles|contacts} CRUD (editor)
///
/// /admin/{hero-slides|partners|team|company-sections}
///                                            CRUD + PUT /reorder (editor)
///
/// /admin/media                               upload, list (editor)
/// /admin/media/{id}[/tags]                   get, update, delete, set tags
/// /admin/media/validate-url                  remote image check (POST)
/// /admin/media/{folders|tags}[/{id}]         folder and tag CRUD
/// ```
///
/// Role checks happen in handler extractors, not in the tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/public", public::router())
        // Back-office.
        .nest("/admin", admin::router())
        .nest("/admin/venues", content::venues_router())
        .nest("/admin/shows", content::shows_router())
        .nest("/admin/events", content::events_router())
        .nest("/admin/press-releases", content::press_releases_router())
        .nest("/admin/press-articles", content::press_articles_router())
        .nest("/admin/press-contacts", content::press_contacts_router())
        .nest("/admin/hero-slides", ordered::hero_slides_router())
        .nest("/admin/partners", ordered::partners_router())
        .nest("/admin/team", ordered::team_router())
        .nest("/admin/company-sections", ordered::company_sections_router())
        .nest("/admin/media", media::router())
}
