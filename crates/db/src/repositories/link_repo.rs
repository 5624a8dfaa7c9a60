//! Insert and remove rows in the film association tables.

use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::models::link::{GenreFilmWork, PersonFilmWork};

/// Column list for `content.genre_film_work` queries.
const GENRE_LINK_COLUMNS: &str = "id, genre_id, film_work_id, created";

/// Column list for `content.person_film_work` queries.
const PERSON_LINK_COLUMNS: &str = "id, person_id, film_work_id, role, created";

/// Film association link rows.
pub struct LinkRepo;

impl LinkRepo {
    /// Link a genre to a film. Unknown ids fail with a foreign-key violation.
    pub async fn link_genre(
        conn: &mut PgConnection,
        film_id: DbId,
        genre_id: DbId,
    ) -> Result<GenreFilmWork, sqlx::Error> {
        let query = format!(
            "INSERT INTO content.genre_film_work (id, genre_id, film_work_id) \
             VALUES ($1, $2, $3) \
             RETURNING {GENRE_LINK_COLUMNS}"
        );
        sqlx::query_as::<_, GenreFilmWork>(&query)
            .bind(DbId::new_v4())
            .bind(genre_id)
            .bind(film_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Remove every link between a film and a genre. Returns rows removed.
    pub async fn unlink_genre(
        conn: &mut PgConnection,
        film_id: DbId,
        genre_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM content.genre_film_work WHERE film_work_id = $1 AND genre_id = $2",
        )
        .bind(film_id)
        .bind(genre_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Link a person to a film under `role`.
    pub async fn link_person(
        conn: &mut PgConnection,
        film_id: DbId,
        person_id: DbId,
        role: &str,
    ) -> Result<PersonFilmWork, sqlx::Error> {
        let query = format!(
            "INSERT INTO content.person_film_work (id, person_id, film_work_id, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PERSON_LINK_COLUMNS}"
        );
        sqlx::query_as::<_, PersonFilmWork>(&query)
            .bind(DbId::new_v4())
            .bind(person_id)
            .bind(film_id)
            .bind(role)
            .fetch_one(&mut *conn)
            .await
    }

    /// Remove links between a film and a person, all roles when `role` is
    /// `None`. Returns rows removed.
    pub async fn unlink_person(
        conn: &mut PgConnection,
        film_id: DbId,
        person_id: DbId,
        role: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM content.person_film_work \
             WHERE film_work_id = $1 AND person_id = $2 \
               AND ($3::TEXT IS NULL OR role = $3)",
        )
        .bind(film_id)
        .bind(person_id)
        .bind(role)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
