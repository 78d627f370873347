//! Route definitions for manually ordered lists.
//!
//! Each list exposes the same shape:
//!
//! ```text
//! GET    /          -> list (by position)
//! POST   /          -> create (appended last)
//! PUT    /reorder   -> reorder
//! GET    /{id}      -> get
//! PUT    /{id}      -> update
//! DELETE /{id}      -> delete
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{company_sections, hero_slides, partners, team};
use crate::state::AppState;

pub fn hero_slides_router() -> Router<AppState> {
    Router::new()
        .route("/", get(hero_slides::list).post(hero_slides::create))
        .route("/reorder", put(hero_slides::reorder))
        .route(
            "/{id}",
            get(hero_slides::get)
                .put(hero_slides::update)
                .delete(hero_slides::delete),
        )
}

pub fn partners_router() -> Router<AppState> {
    Router::new()
        .route("/", get(partners::list).post(partners::create))
        .route("/reorder", put(partners::reorder))
        .route(
            "/{id}",
            get(partners::get).put(partners::update).delete(partners::delete),
        )
}

pub fn team_router() -> Router<AppState> {
    Router::new()
        .route("/", get(team::list).post(team::create))
        .route("/reorder", put(team::reorder))
        .route("/{id}", get(team::get).put(team::update).delete(team::delete))
}

pub fn company_sections_router() -> Router<AppState> {
    Router::new()
        .route("/", get(company_sections::list).post(company_sections::create))
        .route("/reorder", put(company_sections::reorder))
        .route(
            "/{id}",
            get(company_sections::get)
                .put(company_sections::update)
                .delete(company_sections::delete),
        )
}
