//! Person-specific queries: name search and filmography.

use async_trait::async_trait;
use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::entity::{Entity, Related};
use crate::models::film::Film;
use crate::models::person::{Person, PersonRelations};
use crate::repositories::generic::Repo;

/// Person queries on top of the generic [`Repo<Person>`].
pub struct PersonRepo;

impl PersonRepo {
    /// Case-insensitive substring search on the full name.
    pub async fn search_by_name(
        conn: &mut PgConnection,
        query: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Person>, sqlx::Error> {
        Repo::<Person>::search_by_field(conn, "full_name", query, skip, limit).await
    }

    /// Films a person is credited on in any role, highest rated first.
    ///
    /// A film appears once even if the person holds several roles on it.
    pub async fn get_films_by_person(
        conn: &mut PgConnection,
        person_id: DbId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} \
             WHERE id IN ( \
                 SELECT film_work_id FROM content.person_film_work WHERE person_id = $1 \
             ) \
             ORDER BY {} \
             LIMIT $2 OFFSET $3",
            Film::columns(),
            Film::TABLE,
            Film::default_order_by()
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(person_id)
            .bind(limit.max(0))
            .bind(skip.max(0))
            .fetch_all(&mut *conn)
            .await
    }
}

#[async_trait]
impl Related for Person {
    type Relations = PersonRelations;

    async fn load_relations(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<PersonRelations, sqlx::Error> {
        let films = PersonRepo::get_films_by_person(conn, id, 0, i64::MAX).await?;
        Ok(PersonRelations { films })
    }
}
