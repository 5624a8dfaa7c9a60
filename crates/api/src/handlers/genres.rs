//! Handlers for the `/genres` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use filmcat_core::error::CoreError;
use filmcat_core::pagination::{DEFAULT_GENRE_PAGE_SIZE, MAX_GENRE_PAGE_SIZE};
use filmcat_core::types::DbId;
use filmcat_core::validation::{validate_optional_text, validate_required_text};
use filmcat_db::models::genre::{CreateGenre, Genre, UpdateGenre};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::{BulkDeleteRequest, BulkDeleteResponse, PageParams};
use crate::state::AppState;

fn genre_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Genre", id })
}

/// GET /api/v1/genres
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<Vec<Genre>>> {
    let page = params.resolve(DEFAULT_GENRE_PAGE_SIZE, MAX_GENRE_PAGE_SIZE)?;
    let genres = state
        .uow
        .scope(|uow| {
            Box::pin(async move { uow.genres().get_genres(page.skip(), page.page_size).await })
        })
        .await?;
    Ok(Json(genres))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Genre>> {
    let genre = state
        .uow
        .scope(|uow| Box::pin(async move { uow.genres().get_genre(id).await }))
        .await?
        .ok_or_else(|| genre_not_found(id))?;
    Ok(Json(genre))
}

/// POST /api/v1/genres
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    validate_required_text("name", &input.name)?;
    let genre = state
        .uow
        .scope(|uow| Box::pin(async move { uow.genres().create_genre(input).await }))
        .await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// PUT /api/v1/genres/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    validate_optional_text("name", input.name.as_deref())?;
    let genre = state
        .uow
        .scope(|uow| Box::pin(async move { uow.genres().update_genre(id, input).await }))
        .await?
        .ok_or_else(|| genre_not_found(id))?;
    Ok(Json(genre))
}

/// DELETE /api/v1/genres/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<StatusCode> {
    let deleted = state
        .uow
        .scope(|uow| Box::pin(async move { uow.genres().delete_genre(id).await }))
        .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(genre_not_found(id))
    }
}

/// POST /api/v1/genres/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    let deleted = state
        .uow
        .scope(|uow| Box::pin(async move { uow.genres().bulk_delete(&input.ids).await }))
        .await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}
