pub mod films;
pub mod genres;
pub mod health;
pub mod persons;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /films                                     list, create
/// /films/search                              title search
/// /films/search/description                  description search (POST)
/// /films/bulk-delete                         bulk delete (POST)
/// /films/{id}                                detail, update, delete
/// /films/{id}/genres                         link genre (POST)
/// /films/{id}/genres/{genre_id}              unlink genre
/// /films/{id}/persons                        link person (POST)
/// /films/{id}/persons/{person_id}            unlink person (?role=)
///
/// /genres                                    list, create
/// /genres/bulk-delete                        bulk delete (POST)
/// /genres/{id}                               get, update, delete
///
/// /persons                                   paginated list, create
/// /persons/search                            name search
/// /persons/bulk-delete                       bulk delete (POST)
/// /persons/{id}                              detail, update, delete
/// /persons/{id}/films                        filmography
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/films", films::router())
        .nest("/genres", genres::router())
        .nest("/persons", persons::router())
}
