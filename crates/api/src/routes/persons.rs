use axum::routing::{get, post};
use axum::Router;

use crate::handlers::persons;
use crate::state::AppState;

/// Routes mounted at `/persons`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(persons::list).post(persons::create))
        .route("/search", get(persons::search))
        .route("/bulk-delete", post(persons::bulk_delete))
        .route(
            "/{id}",
            get(persons::get_by_id)
                .put(persons::update)
                .delete(persons::delete),
        )
        .route("/{id}/films", get(persons::films))
}
