use axum::routing::{get, post};
use axum::Router;

use crate::handlers::genres;
use crate::state::AppState;

/// Routes mounted at `/genres`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list).post(genres::create))
        .route("/bulk-delete", post(genres::bulk_delete))
        .route(
            "/{id}",
            get(genres::get_by_id)
                .put(genres::update)
                .delete(genres::delete),
        )
}
