//! Genre entity model and DTOs.

use filmcat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Column, Entity};
use crate::fields::{FieldKind, FieldMap, IntoFieldMap};

/// A row from `content.genre`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Genre {
    #[serde(rename = "uuid")]
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl Entity for Genre {
    const NAME: &'static str = "Genre";
    const TABLE: &'static str = "content.genre";
    const SCHEMA: &'static [Column] = &[
        Column::managed("id", FieldKind::Id),
        Column::field("name", FieldKind::Text),
        Column::field("description", FieldKind::Text),
        Column::managed("created", FieldKind::Timestamp),
        Column::managed("modified", FieldKind::Timestamp),
    ];

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a genre.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenre {
    pub name: String,
    pub description: Option<String>,
}

impl IntoFieldMap for CreateGenre {
    fn into_field_map(self) -> FieldMap {
        FieldMap::new()
            .with("name", self.name)
            .with_opt("description", self.description)
    }
}

/// DTO for updating a genre. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGenre {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl IntoFieldMap for UpdateGenre {
    fn into_field_map(self) -> FieldMap {
        FieldMap::new()
            .with_opt("name", self.name)
            .with_opt("description", self.description)
    }
}
