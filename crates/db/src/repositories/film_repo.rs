//! Film-specific queries: sortable and genre-filtered listing, title
//! search, and role-filtered credits.

use async_trait::async_trait;
use filmcat_core::sorting::{FilmSort, DEFAULT_FILM_SORT};
use filmcat_core::types::DbId;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::entity::{Entity, Related};
use crate::models::film::{Film, FilmPerson, FilmRelations};
use crate::models::genre::Genre;
use crate::models::person::Person;
use crate::repositories::generic::{push_page, Repo, DEFAULT_LIMIT};

/// Parameters for [`FilmRepo::list`].
#[derive(Debug, Clone)]
pub struct FilmListParams {
    pub skip: i64,
    pub limit: i64,
    /// Sort key such as `-rating`; unknown keys leave the list unsorted.
    pub sort_by: String,
    /// Restrict to films linked to this genre.
    pub genre_id: Option<DbId>,
}

impl Default for FilmListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            sort_by: DEFAULT_FILM_SORT.to_string(),
            genre_id: None,
        }
    }
}

/// Film queries on top of the generic [`Repo<Film>`].
pub struct FilmRepo;

impl FilmRepo {
    /// List films with dynamic sorting and optional genre filtering.
    pub async fn list(
        conn: &mut PgConnection,
        params: &FilmListParams,
    ) -> Result<Vec<Film>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE 1=1",
            Film::columns(),
            Film::TABLE
        ));
        push_genre_filter(&mut qb, params.genre_id);

        match FilmSort::parse(&params.sort_by) {
            Some(sort) => {
                qb.push(format!(" ORDER BY {}", sort.order_by_sql()));
            }
            None => {
                tracing::debug!(sort_by = %params.sort_by, "Unrecognized film sort key, leaving unsorted");
            }
        }
        push_page(&mut qb, params.skip, params.limit);

        qb.build_query_as::<Film>().fetch_all(&mut *conn).await
    }

    /// Count films, optionally restricted to one genre.
    pub async fn count(conn: &mut PgConnection, genre_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM {} WHERE 1=1",
            Film::TABLE
        ));
        push_genre_filter(&mut qb, genre_id);
        qb.build_query_scalar::<i64>().fetch_one(&mut *conn).await
    }

    /// Case-insensitive substring search on the title.
    pub async fn search_by_title(
        conn: &mut PgConnection,
        query: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Film>, sqlx::Error> {
        Repo::<Film>::search_by_field(conn, "title", query, skip, limit).await
    }

    /// Persons linked to a film under exactly `role`, ordered by name.
    pub async fn get_persons_by_role(
        conn: &mut PgConnection,
        film_id: DbId,
        role: &str,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} \
             WHERE id IN ( \
                 SELECT person_id FROM content.person_film_work \
                 WHERE film_work_id = $1 AND role = $2 \
             ) \
             ORDER BY full_name, id",
            Person::columns(),
            Person::TABLE
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(film_id)
            .bind(role)
            .fetch_all(&mut *conn)
            .await
    }

    /// Genres linked to a film, ordered by name.
    pub async fn get_genres(conn: &mut PgConnection, film_id: DbId) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} \
             WHERE id IN ( \
                 SELECT genre_id FROM content.genre_film_work WHERE film_work_id = $1 \
             ) \
             ORDER BY name, id",
            Genre::columns(),
            Genre::TABLE
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(film_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Every person credited on a film with the role of each link.
    pub async fn get_credits(
        conn: &mut PgConnection,
        film_id: DbId,
    ) -> Result<Vec<FilmPerson>, sqlx::Error> {
        sqlx::query_as::<_, FilmPerson>(
            "SELECT p.id, p.full_name, pfw.role \
             FROM content.person p \
             JOIN content.person_film_work pfw ON pfw.person_id = p.id \
             WHERE pfw.film_work_id = $1 \
             ORDER BY pfw.role, p.full_name, p.id",
        )
        .bind(film_id)
        .fetch_all(&mut *conn)
        .await
    }
}

#[async_trait]
impl Related for Film {
    type Relations = FilmRelations;

    async fn load_relations(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<FilmRelations, sqlx::Error> {
        let genres = FilmRepo::get_genres(conn, id).await?;
        let persons = FilmRepo::get_credits(conn, id).await?;
        Ok(FilmRelations { genres, persons })
    }
}

fn push_genre_filter(qb: &mut QueryBuilder<'_, Postgres>, genre_id: Option<DbId>) {
    if let Some(genre_id) = genre_id {
        qb.push(
            " AND id IN (SELECT film_work_id FROM content.genre_film_work WHERE genre_id = ",
        );
        qb.push_bind(genre_id);
        qb.push(")");
    }
}
