//! Handlers for the `/films` resource and its genre/person links.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use filmcat_core::error::CoreError;
use filmcat_core::pagination::clamp_limit;
use filmcat_core::types::DbId;
use filmcat_core::validation::{validate_optional_text, validate_rating, validate_required_text};
use filmcat_db::models::film::{CreateFilm, Film, FilmDetail, FilmSummary, UpdateFilm};
use filmcat_db::models::link::{GenreFilmWork, LinkGenre, LinkPerson, PersonFilmWork};
use filmcat_db::repositories::FilmListParams;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::{BulkDeleteRequest, BulkDeleteResponse, FilmListQuery, RoleQuery, SearchQuery};
use crate::state::AppState;

/// Result count for description search when the request names none.
const DEFAULT_DESCRIPTION_LIMIT: i64 = 10;

/// Body of `POST /films/search/description`.
#[derive(Debug, Deserialize)]
pub struct DescriptionSearchRequest {
    pub description: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScoredFilmResponse {
    pub uuid: DbId,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub similarity_score: f64,
}

#[derive(Debug, Serialize)]
pub struct DescriptionSearchResponse {
    pub films: Vec<ScoredFilmResponse>,
    pub total_results: usize,
    pub search_description: String,
}

fn film_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Film", id })
}

fn validate_create(input: &CreateFilm) -> Result<(), CoreError> {
    validate_required_text("title", &input.title)?;
    validate_required_text("type", &input.kind)?;
    validate_rating(input.rating)
}

fn validate_update(input: &UpdateFilm) -> Result<(), CoreError> {
    validate_optional_text("title", input.title.as_deref())?;
    validate_optional_text("type", input.kind.as_deref())?;
    validate_rating(input.rating)
}

/// GET /api/v1/films
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FilmListQuery>,
) -> AppResult<Json<Vec<FilmSummary>>> {
    let page = query.resolve(state.config.default_page_size, state.config.max_page_size)?;
    let params = FilmListParams {
        skip: page.skip(),
        limit: page.page_size,
        sort_by: query.sort,
        genre_id: query.genre,
    };

    let films = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().get_films(&params).await }))
        .await?;
    Ok(Json(films.into_iter().map(FilmSummary::from).collect()))
}

/// GET /api/v1/films/search
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<Vec<FilmSummary>>> {
    let page = query.resolve(state.config.default_page_size, state.config.max_page_size)?;
    let term = query.query;

    let films = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                uow.films()
                    .search_films(&term, page.skip(), page.page_size)
                    .await
            })
        })
        .await?;
    Ok(Json(films.into_iter().map(FilmSummary::from).collect()))
}

/// POST /api/v1/films/search/description
pub async fn search_by_description(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DescriptionSearchRequest>,
) -> AppResult<Json<DescriptionSearchResponse>> {
    validate_required_text("description", &input.description)?;
    let limit = clamp_limit(input.limit, DEFAULT_DESCRIPTION_LIMIT, state.config.max_page_size);
    let description = input.description;

    let (description, results) = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                let results = uow.films().search_by_description(&description, limit).await?;
                Ok::<_, sqlx::Error>((description, results))
            })
        })
        .await?;

    let films: Vec<ScoredFilmResponse> = results
        .into_iter()
        .map(|scored| ScoredFilmResponse {
            uuid: scored.film.id,
            title: scored.film.title,
            imdb_rating: scored.film.rating,
            similarity_score: scored.score,
        })
        .collect();

    Ok(Json(DescriptionSearchResponse {
        total_results: films.len(),
        films,
        search_description: description,
    }))
}

/// GET /api/v1/films/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<FilmDetail>> {
    let detail = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().get_film_detail(id).await }))
        .await?
        .ok_or_else(|| film_not_found(id))?;
    Ok(Json(detail))
}

/// POST /api/v1/films
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateFilm>,
) -> AppResult<(StatusCode, Json<Film>)> {
    validate_create(&input)?;
    let film = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().create_film(input).await }))
        .await?;
    Ok((StatusCode::CREATED, Json(film)))
}

/// PUT /api/v1/films/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateFilm>,
) -> AppResult<Json<Film>> {
    validate_update(&input)?;
    let film = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().update_film(id, input).await }))
        .await?
        .ok_or_else(|| film_not_found(id))?;
    Ok(Json(film))
}

/// DELETE /api/v1/films/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<StatusCode> {
    let deleted = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().delete_film(id).await }))
        .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(film_not_found(id))
    }
}

/// POST /api/v1/films/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    let deleted = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().bulk_delete(&input.ids).await }))
        .await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}

/// POST /api/v1/films/{id}/genres
///
/// An unknown genre id surfaces as a foreign-key conflict.
pub async fn add_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<LinkGenre>,
) -> AppResult<(StatusCode, Json<GenreFilmWork>)> {
    let link = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                let mut films = uow.films();
                if films.get_film(id).await?.is_none() {
                    return Err(film_not_found(id));
                }
                Ok(films.add_genre(id, input.genre_id).await?)
            })
        })
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/v1/films/{id}/genres/{genre_id}
pub async fn remove_genre(
    State(state): State<AppState>,
    ApiPath((id, genre_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = state
        .uow
        .scope(|uow| Box::pin(async move { uow.films().remove_genre(id, genre_id).await }))
        .await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Genre link",
            id: genre_id,
        }))
    }
}

/// POST /api/v1/films/{id}/persons
pub async fn add_person(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<LinkPerson>,
) -> AppResult<(StatusCode, Json<PersonFilmWork>)> {
    validate_required_text("role", &input.role)?;
    let link = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                let mut films = uow.films();
                if films.get_film(id).await?.is_none() {
                    return Err(film_not_found(id));
                }
                Ok(films.add_person(id, input).await?)
            })
        })
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/v1/films/{id}/persons/{person_id}?role=
pub async fn remove_person(
    State(state): State<AppState>,
    ApiPath((id, person_id)): ApiPath<(DbId, DbId)>,
    ApiQuery(query): ApiQuery<RoleQuery>,
) -> AppResult<StatusCode> {
    let role = query.role;
    let removed = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                uow.films()
                    .remove_person(id, person_id, role.as_deref())
                    .await
            })
        })
        .await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Person link",
            id: person_id,
        }))
    }
}
