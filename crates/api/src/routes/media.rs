//! Route definitions for the media library.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/admin/media`.
///
/// Static segments are registered before `/{id}`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> upload (multipart)
/// POST   /validate-url    -> validate_url
/// GET    /folders         -> list_folders
/// POST   /folders         -> create_folder
/// PUT    /folders/{id}    -> update_folder
/// DELETE /folders/{id}    -> delete_folder
/// GET    /tags            -> list_tags
/// POST   /tags            -> create_tag
/// PUT    /tags/{id}       -> update_tag
/// DELETE /tags/{id}       -> delete_tag
/// GET    /{id}            -> get
/// PUT    /{id}            -> update
/// DELETE /{id}?force=     -> delete
/// PUT    /{id}/tags       -> set_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list).post(media::upload))
        .route("/validate-url", post(media::validate_url))
        .route("/folders", get(media::list_folders).post(media::create_folder))
        .route(
            "/folders/{id}",
            put(media::update_folder).delete(media::delete_folder),
        )
        .route("/tags", get(media::list_tags).post(media::create_tag))
        .route("/tags/{id}", put(media::update_tag).delete(media::delete_tag))
        .route(
            "/{id}",
            get(media::get).put(media::update).delete(media::delete),
        )
        .route("/{id}/tags", put(media::set_tags))
}
