//! Person entity model, DTOs and detail view.

use filmcat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Column, Entity};
use crate::fields::{FieldKind, FieldMap, IntoFieldMap};
use crate::models::film::{Film, FilmSummary};

/// A row from `content.person`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Person {
    #[serde(rename = "uuid")]
    pub id: DbId,
    pub full_name: String,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl Entity for Person {
    const NAME: &'static str = "Person";
    const TABLE: &'static str = "content.person";
    const SCHEMA: &'static [Column] = &[
        Column::managed("id", FieldKind::Id),
        Column::field("full_name", FieldKind::Text),
        Column::managed("created", FieldKind::Timestamp),
        Column::managed("modified", FieldKind::Timestamp),
    ];

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub full_name: String,
}

impl IntoFieldMap for CreatePerson {
    fn into_field_map(self) -> FieldMap {
        FieldMap::new().with("full_name", self.full_name)
    }
}

/// DTO for updating a person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePerson {
    pub full_name: Option<String>,
}

impl IntoFieldMap for UpdatePerson {
    fn into_field_map(self) -> FieldMap {
        FieldMap::new().with_opt("full_name", self.full_name)
    }
}

/// Associations eager-loaded with a person.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonRelations {
    pub films: Vec<Film>,
}

/// Compact person representation used by search and list responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSummary {
    pub uuid: DbId,
    pub full_name: String,
}

impl From<Person> for PersonSummary {
    fn from(person: Person) -> Self {
        Self {
            uuid: person.id,
            full_name: person.full_name,
        }
    }
}

/// Person detail view with the films they are credited on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDetail {
    pub uuid: DbId,
    pub full_name: String,
    pub films: Vec<FilmSummary>,
}
