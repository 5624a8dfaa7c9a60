//! Film entity model, DTOs and the view structs built from it.

use filmcat_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Column, Entity};
use crate::fields::{FieldKind, FieldMap, IntoFieldMap};
use crate::models::genre::Genre;
use crate::models::person::Person;

/// A row from `content.film_work`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Film {
    #[serde(rename = "uuid")]
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub creation_date: Option<Date>,
    pub rating: Option<f64>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl Entity for Film {
    const NAME: &'static str = "Film";
    const TABLE: &'static str = "content.film_work";
    const SCHEMA: &'static [Column] = &[
        Column::managed("id", FieldKind::Id),
        Column::field("title", FieldKind::Text),
        Column::field("description", FieldKind::Text),
        Column::field("creation_date", FieldKind::Date),
        Column::field("rating", FieldKind::Float),
        Column::field("type", FieldKind::Text),
        Column::managed("created", FieldKind::Timestamp),
        Column::managed("modified", FieldKind::Timestamp),
    ];
    const DEFAULT_SORT: Option<&'static str> = Some("rating");

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a film.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFilm {
    pub title: String,
    pub description: Option<String>,
    pub creation_date: Option<Date>,
    pub rating: Option<f64>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl IntoFieldMap for CreateFilm {
    fn into_field_map(self) -> FieldMap {
        FieldMap::new()
            .with("title", self.title)
            .with_opt("description", self.description)
            .with_opt("creation_date", self.creation_date)
            .with_opt("rating", self.rating)
            .with("type", self.kind)
    }
}

/// DTO for updating a film. Only supplied fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFilm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub creation_date: Option<Date>,
    pub rating: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl IntoFieldMap for UpdateFilm {
    fn into_field_map(self) -> FieldMap {
        FieldMap::new()
            .with_opt("title", self.title)
            .with_opt("description", self.description)
            .with_opt("creation_date", self.creation_date)
            .with_opt("rating", self.rating)
            .with_opt("type", self.kind)
    }
}

/// Compact film representation used by list and search responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmSummary {
    pub uuid: DbId,
    pub title: String,
    pub imdb_rating: Option<f64>,
}

impl From<&Film> for FilmSummary {
    fn from(film: &Film) -> Self {
        Self {
            uuid: film.id,
            title: film.title.clone(),
            imdb_rating: film.rating,
        }
    }
}

impl From<Film> for FilmSummary {
    fn from(film: Film) -> Self {
        Self {
            uuid: film.id,
            title: film.title,
            imdb_rating: film.rating,
        }
    }
}

/// A person linked to a film, with the role of that link.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FilmPerson {
    #[serde(rename = "uuid")]
    pub id: DbId,
    pub full_name: String,
    pub role: String,
}

/// Associations eager-loaded with a film.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilmRelations {
    pub genres: Vec<Genre>,
    pub persons: Vec<FilmPerson>,
}

/// Genre reference embedded in a film detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRef {
    pub uuid: DbId,
    pub name: String,
}

impl From<&Genre> for GenreRef {
    fn from(genre: &Genre) -> Self {
        Self {
            uuid: genre.id,
            name: genre.name.clone(),
        }
    }
}

/// Person reference embedded in a film detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRef {
    pub uuid: DbId,
    pub full_name: String,
}

impl From<Person> for PersonRef {
    fn from(person: Person) -> Self {
        Self {
            uuid: person.id,
            full_name: person.full_name,
        }
    }
}

/// Film detail view: the film plus its genres and role-filtered credits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmDetail {
    pub uuid: DbId,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Vec<GenreRef>,
    pub actors: Vec<PersonRef>,
    pub writers: Vec<PersonRef>,
    pub directors: Vec<PersonRef>,
}
