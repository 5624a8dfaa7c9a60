//! Film operations, film detail assembly and association management.

use filmcat_core::roles::{ROLE_ACTOR, ROLE_DIRECTOR, ROLE_WRITER};
use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::models::film::{CreateFilm, Film, FilmDetail, GenreRef, PersonRef, UpdateFilm};
use crate::models::link::{GenreFilmWork, LinkPerson, PersonFilmWork};
use crate::repositories::{FilmListParams, FilmRepo, LinkRepo};
use crate::search::{ScoredFilm, SearchHandle};
use crate::services::CrudService;

pub struct FilmService<'a> {
    conn: &'a mut PgConnection,
    search: SearchHandle,
}

impl<'a> FilmService<'a> {
    pub fn new(conn: &'a mut PgConnection, search: SearchHandle) -> Self {
        Self { conn, search }
    }

    fn crud(&mut self) -> CrudService<'_, Film> {
        CrudService::new(&mut *self.conn)
    }

    /// Sorted, optionally genre-filtered listing.
    pub async fn get_films(&mut self, params: &FilmListParams) -> Result<Vec<Film>, sqlx::Error> {
        FilmRepo::list(&mut *self.conn, params).await
    }

    pub async fn get_film(&mut self, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        self.crud().get(id).await
    }

    /// The film with its genres and its actors, writers and directors.
    pub async fn get_film_detail(&mut self, id: DbId) -> Result<Option<FilmDetail>, sqlx::Error> {
        let Some(film) = self.get_film(id).await? else {
            return Ok(None);
        };

        let genres = FilmRepo::get_genres(&mut *self.conn, id).await?;
        let actors = self.credited(id, ROLE_ACTOR).await?;
        let writers = self.credited(id, ROLE_WRITER).await?;
        let directors = self.credited(id, ROLE_DIRECTOR).await?;

        Ok(Some(FilmDetail {
            uuid: film.id,
            title: film.title,
            imdb_rating: film.rating,
            description: film.description,
            genre: genres.iter().map(GenreRef::from).collect(),
            actors,
            writers,
            directors,
        }))
    }

    async fn credited(&mut self, film_id: DbId, role: &str) -> Result<Vec<PersonRef>, sqlx::Error> {
        let persons = FilmRepo::get_persons_by_role(&mut *self.conn, film_id, role).await?;
        Ok(persons.into_iter().map(PersonRef::from).collect())
    }

    pub async fn search_films(
        &mut self,
        query: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Film>, sqlx::Error> {
        FilmRepo::search_by_title(&mut *self.conn, query, skip, limit).await
    }

    /// Rank films by description through the injected search capability.
    pub async fn search_by_description(
        &mut self,
        description: &str,
        limit: i64,
    ) -> Result<Vec<ScoredFilm>, sqlx::Error> {
        let results = self
            .search
            .search_by_description(&mut *self.conn, description, limit)
            .await?;
        tracing::debug!(count = results.len(), available = self.search.is_available(), "Description search");
        Ok(results)
    }

    pub fn search_available(&self) -> bool {
        self.search.is_available()
    }

    pub async fn create_film(&mut self, input: CreateFilm) -> Result<Film, sqlx::Error> {
        self.crud().create(input).await
    }

    pub async fn update_film(
        &mut self,
        id: DbId,
        input: UpdateFilm,
    ) -> Result<Option<Film>, sqlx::Error> {
        self.crud().update(id, input).await
    }

    pub async fn delete_film(&mut self, id: DbId) -> Result<bool, sqlx::Error> {
        self.crud().delete(id).await
    }

    pub async fn bulk_delete(&mut self, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        self.crud().bulk_delete(ids).await
    }

    pub async fn count(&mut self, genre_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        FilmRepo::count(&mut *self.conn, genre_id).await
    }

    pub async fn add_genre(
        &mut self,
        film_id: DbId,
        genre_id: DbId,
    ) -> Result<GenreFilmWork, sqlx::Error> {
        let link = LinkRepo::link_genre(&mut *self.conn, film_id, genre_id).await?;
        tracing::info!(%film_id, %genre_id, "Genre linked to film");
        Ok(link)
    }

    /// Returns `false` when the film and genre were not linked.
    pub async fn remove_genre(&mut self, film_id: DbId, genre_id: DbId) -> Result<bool, sqlx::Error> {
        let removed = LinkRepo::unlink_genre(&mut *self.conn, film_id, genre_id).await?;
        if removed == 0 {
            tracing::warn!(%film_id, %genre_id, "Genre link not found");
        }
        Ok(removed > 0)
    }

    pub async fn add_person(
        &mut self,
        film_id: DbId,
        input: LinkPerson,
    ) -> Result<PersonFilmWork, sqlx::Error> {
        let link =
            LinkRepo::link_person(&mut *self.conn, film_id, input.person_id, &input.role).await?;
        tracing::info!(%film_id, person_id = %input.person_id, role = %input.role, "Person linked to film");
        Ok(link)
    }

    /// Unlink a person from a film, under one role or all of them.
    pub async fn remove_person(
        &mut self,
        film_id: DbId,
        person_id: DbId,
        role: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let removed = LinkRepo::unlink_person(&mut *self.conn, film_id, person_id, role).await?;
        if removed == 0 {
            tracing::warn!(%film_id, %person_id, ?role, "Person link not found");
        }
        Ok(removed > 0)
    }
}
