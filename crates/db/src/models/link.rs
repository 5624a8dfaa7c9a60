//! Link rows for the film many-to-many associations.
//!
//! Neither table declares uniqueness, so the same genre or the same
//! person/role pair can be linked to a film more than once.

use filmcat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `content.genre_film_work`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct GenreFilmWork {
    pub id: DbId,
    pub genre_id: DbId,
    pub film_work_id: DbId,
    pub created: Timestamp,
}

/// A row from `content.person_film_work`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PersonFilmWork {
    pub id: DbId,
    pub person_id: DbId,
    pub film_work_id: DbId,
    pub role: String,
    pub created: Timestamp,
}

/// DTO for linking a genre to a film.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkGenre {
    pub genre_id: DbId,
}

/// DTO for linking a person to a film under a role.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkPerson {
    pub person_id: DbId,
    pub role: String,
}
