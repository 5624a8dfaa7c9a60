//! Handlers for the `/persons` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use filmcat_core::error::CoreError;
use filmcat_core::pagination::Page;
use filmcat_core::types::DbId;
use filmcat_core::validation::{validate_optional_text, validate_required_text};
use filmcat_db::models::film::FilmSummary;
use filmcat_db::models::person::{CreatePerson, Person, PersonDetail, PersonSummary, UpdatePerson};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::{BulkDeleteRequest, BulkDeleteResponse, PageParams, SearchQuery};
use crate::state::AppState;

fn person_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Person", id })
}

/// GET /api/v1/persons
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<Page<PersonSummary>>> {
    let page = params.resolve(state.config.default_page_size, state.config.max_page_size)?;
    let persons = state
        .uow
        .scope(|uow| {
            Box::pin(async move { uow.persons().get_persons_page(page.page, page.page_size).await })
        })
        .await?;
    Ok(Json(persons.map(PersonSummary::from)))
}

/// GET /api/v1/persons/search
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<Vec<PersonSummary>>> {
    let page = query.resolve(state.config.default_page_size, state.config.max_page_size)?;
    let term = query.query;
    let persons = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                uow.persons()
                    .search_persons(&term, page.skip(), page.page_size)
                    .await
            })
        })
        .await?;
    Ok(Json(persons.into_iter().map(PersonSummary::from).collect()))
}

/// GET /api/v1/persons/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<PersonDetail>> {
    let detail = state
        .uow
        .scope(|uow| Box::pin(async move { uow.persons().get_person_detail(id).await }))
        .await?
        .ok_or_else(|| person_not_found(id))?;
    Ok(Json(detail))
}

/// GET /api/v1/persons/{id}/films
pub async fn films(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<Vec<FilmSummary>>> {
    let page = params.resolve(state.config.default_page_size, state.config.max_page_size)?;
    let films = state
        .uow
        .scope(|uow| {
            Box::pin(async move {
                let mut persons = uow.persons();
                if persons.get_person(id).await?.is_none() {
                    return Err(person_not_found(id));
                }
                Ok(persons.get_person_films(id, page.skip(), page.page_size).await?)
            })
        })
        .await?;
    Ok(Json(films.into_iter().map(FilmSummary::from).collect()))
}

/// POST /api/v1/persons
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    validate_required_text("full_name", &input.full_name)?;
    let person = state
        .uow
        .scope(|uow| Box::pin(async move { uow.persons().create_person(input).await }))
        .await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// PUT /api/v1/persons/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdatePerson>,
) -> AppResult<Json<Person>> {
    validate_optional_text("full_name", input.full_name.as_deref())?;
    let person = state
        .uow
        .scope(|uow| Box::pin(async move { uow.persons().update_person(id, input).await }))
        .await?
        .ok_or_else(|| person_not_found(id))?;
    Ok(Json(person))
}

/// DELETE /api/v1/persons/{id}
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<DbId>) -> AppResult<StatusCode> {
    let deleted = state
        .uow
        .scope(|uow| Box::pin(async move { uow.persons().delete_person(id).await }))
        .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(person_not_found(id))
    }
}

/// POST /api/v1/persons/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    let deleted = state
        .uow
        .scope(|uow| Box::pin(async move { uow.persons().bulk_delete(&input.ids).await }))
        .await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}
