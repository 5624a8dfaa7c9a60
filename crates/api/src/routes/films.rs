//! Route definitions for the `/films` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Routes mounted at `/films`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list).post(films::create))
        .route("/search", get(films::search))
        .route("/search/description", post(films::search_by_description))
        .route("/bulk-delete", post(films::bulk_delete))
        .route(
            "/{id}",
            get(films::get_by_id)
                .put(films::update)
                .delete(films::delete),
        )
        .route("/{id}/genres", post(films::add_genre))
        .route("/{id}/genres/{genre_id}", delete(films::remove_genre))
        .route("/{id}/persons", post(films::add_person))
        .route("/{id}/persons/{person_id}", delete(films::remove_person))
}
