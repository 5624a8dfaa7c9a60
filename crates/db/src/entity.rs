//! Compile-time schema descriptors for persisted entities.
//!
//! Every table the generic repository can operate on implements [`Entity`],
//! which lists its columns, which of them callers may write, and how rows
//! are ordered by default. Entities whose detail view pulls in associated
//! rows additionally implement [`Related`].

use std::fmt::Debug;

use async_trait::async_trait;
use filmcat_core::types::DbId;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

use crate::fields::FieldKind;

/// One column of an entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether create/update payloads may set this column.
    pub writable: bool,
}

impl Column {
    /// A column managed by the store or the repository (id, timestamps).
    pub const fn managed(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            writable: false,
        }
    }

    /// A column callers may set.
    pub const fn field(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            writable: true,
        }
    }
}

/// Schema descriptor for a table handled by [`crate::repositories::Repo`].
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Human-readable name used in logs and not-found errors.
    const NAME: &'static str;

    /// Schema-qualified table name.
    const TABLE: &'static str;

    /// All columns, in select order. The first must be `id`.
    const SCHEMA: &'static [Column];

    /// Column listings are ordered by, descending, when set.
    const DEFAULT_SORT: Option<&'static str> = None;

    fn id(&self) -> DbId;

    /// Comma-separated select list.
    fn columns() -> String {
        Self::SCHEMA
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn column(name: &str) -> Option<&'static Column> {
        Self::SCHEMA.iter().find(|c| c.name == name)
    }

    /// `ORDER BY` fragment used by list and search.
    fn default_order_by() -> String {
        match Self::DEFAULT_SORT {
            Some(col) => format!("{col} DESC NULLS LAST, id ASC"),
            None => "id ASC".to_string(),
        }
    }
}

/// Entities with associations that are eager-loaded on detail fetches.
#[async_trait]
pub trait Related: Entity {
    type Relations: Serialize + Debug + Default + Send;

    /// Load every association of the row with the given id. Issues one query
    /// per association regardless of how many rows each returns.
    async fn load_relations(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Self::Relations, sqlx::Error>;
}

/// Placeholder relations for entities without eager-loaded associations.
#[derive(Debug, Default, Clone, Serialize)]
pub struct NoRelations {}

/// An entity together with its loaded associations. Serializes flat.
#[derive(Debug, Serialize)]
pub struct WithRelations<E: Related> {
    #[serde(flatten)]
    pub entity: E,
    #[serde(flatten)]
    pub relations: E::Relations,
}
