//! Generic CRUD, count and substring search over any [`Entity`].

use std::marker::PhantomData;

use filmcat_core::types::DbId;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::entity::{Entity, Related, WithRelations};
use crate::fields::{FieldKind, FieldMap, FieldValue, Filters};

/// Default page size when callers do not supply one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Uniform data access for one entity type.
///
/// `Repo<Genre>` is used as-is; films and persons layer extra queries on top
/// in [`super::FilmRepo`] and [`super::PersonRepo`].
pub struct Repo<E>(PhantomData<E>);

impl<E: Entity> Repo<E> {
    /// Find a row by its ID.
    pub async fn get_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", E::columns(), E::TABLE);
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List rows matching `filters`, in the entity's default order.
    ///
    /// Filter keys that are not columns of the entity, or whose value has the
    /// wrong kind for the column, are ignored.
    pub async fn list(
        conn: &mut PgConnection,
        skip: i64,
        limit: i64,
        filters: &Filters,
    ) -> Result<Vec<E>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE 1=1",
            E::columns(),
            E::TABLE
        ));
        push_filters::<E>(&mut qb, filters);
        qb.push(format!(" ORDER BY {}", E::default_order_by()));
        push_page(&mut qb, skip, limit);

        let rows = qb.build_query_as::<E>().fetch_all(&mut *conn).await?;
        tracing::debug!(entity = E::NAME, count = rows.len(), skip, limit, "Listed rows");
        Ok(rows)
    }

    /// Insert a new row with a freshly generated ID, returning the stored row
    /// including server defaults.
    ///
    /// Keys that are not writable columns are dropped before the insert.
    pub async fn create(conn: &mut PgConnection, fields: &FieldMap) -> Result<E, sqlx::Error> {
        let id = DbId::new_v4();
        let writable = writable_fields::<E>(fields);

        let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (id", E::TABLE));
        for (column, _) in &writable {
            qb.push(", ");
            qb.push(*column);
        }
        qb.push(") VALUES (");
        qb.push_bind(id);
        for (_, value) in &writable {
            qb.push(", ");
            push_value(&mut qb, value);
        }
        qb.push(format!(") RETURNING {}", E::columns()));

        qb.build_query_as::<E>().fetch_one(&mut *conn).await
    }

    /// Apply the writable, non-null fields of `fields` to an existing row.
    ///
    /// Returns `None` if no row with the given `id` exists. An empty payload
    /// leaves the row untouched and returns it as stored.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        fields: &FieldMap,
    ) -> Result<Option<E>, sqlx::Error> {
        let writable = writable_fields::<E>(fields);

        let updated = if writable.is_empty() {
            Self::get_by_id(conn, id).await?
        } else {
            let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", E::TABLE));
            for (column, value) in &writable {
                qb.push(*column);
                qb.push(" = ");
                push_value(&mut qb, value);
                qb.push(", ");
            }
            qb.push("modified = NOW() WHERE id = ");
            qb.push_bind(id);
            qb.push(format!(" RETURNING {}", E::columns()));

            qb.build_query_as::<E>().fetch_optional(&mut *conn).await?
        };

        if updated.is_none() {
            tracing::warn!(entity = E::NAME, %id, "Update failed: row not found");
        }
        Ok(updated)
    }

    /// Delete a row by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&query).bind(id).execute(&mut *conn).await?;

        let deleted = result.rows_affected() > 0;
        if !deleted {
            tracing::warn!(entity = E::NAME, %id, "Delete failed: row not found");
        }
        Ok(deleted)
    }

    /// Delete every row whose ID is in `ids` with a single statement.
    ///
    /// Unknown IDs are skipped. Returns the number of rows removed.
    pub async fn bulk_delete(conn: &mut PgConnection, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let query = format!("DELETE FROM {} WHERE id = ANY($1)", E::TABLE);
        let result = sqlx::query(&query).bind(ids).execute(&mut *conn).await?;

        let deleted = result.rows_affected();
        tracing::info!(entity = E::NAME, requested = ids.len(), deleted, "Bulk delete");
        Ok(deleted)
    }

    /// Count rows matching `filters`, with the same filter rules as [`Repo::list`].
    pub async fn count(conn: &mut PgConnection, filters: &Filters) -> Result<i64, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {} WHERE 1=1", E::TABLE));
        push_filters::<E>(&mut qb, filters);
        qb.build_query_scalar::<i64>().fetch_one(&mut *conn).await
    }

    /// Case-insensitive "contains" search on one text column.
    ///
    /// Returns an empty list when `field` is not a text column of the entity.
    /// `%` and `_` in `term` match literally.
    pub async fn search_by_field(
        conn: &mut PgConnection,
        field: &str,
        term: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<E>, sqlx::Error> {
        let column = match E::column(field) {
            Some(c) if c.kind == FieldKind::Text => c.name,
            _ => {
                tracing::debug!(entity = E::NAME, field, "Search on non-text field ignored");
                return Ok(Vec::new());
            }
        };

        let pattern = format!("%{}%", escape_like(term));
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE {column} ILIKE ",
            E::columns(),
            E::TABLE
        ));
        qb.push_bind(pattern);
        qb.push(format!(" ORDER BY {}", E::default_order_by()));
        push_page(&mut qb, skip, limit);

        let rows = qb.build_query_as::<E>().fetch_all(&mut *conn).await?;
        tracing::debug!(entity = E::NAME, field = column, count = rows.len(), "Search");
        Ok(rows)
    }
}

impl<E: Related> Repo<E> {
    /// Find a row by its ID and eager-load its associations.
    pub async fn get_with_relations(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<WithRelations<E>>, sqlx::Error> {
        let Some(entity) = Self::get_by_id(conn, id).await? else {
            return Ok(None);
        };
        let relations = E::load_relations(conn, id).await?;
        Ok(Some(WithRelations { entity, relations }))
    }
}

/// Writable columns of `E` present in `fields`, paired with their values.
///
/// Column names come from the schema, never from the map keys.
fn writable_fields<'a, E: Entity>(fields: &'a FieldMap) -> Vec<(&'static str, &'a FieldValue)> {
    fields
        .iter()
        .filter_map(|(name, value)| match E::column(name) {
            Some(c) if c.writable && c.kind == value.kind() => Some((c.name, value)),
            _ => {
                tracing::debug!(entity = E::NAME, field = name, "Dropping unknown or invalid field");
                None
            }
        })
        .collect()
}

/// Append ` AND column = $n` for each recognized filter.
pub(crate) fn push_filters<E: Entity>(qb: &mut QueryBuilder<'_, Postgres>, filters: &Filters) {
    for (name, value) in filters.iter() {
        if let Some(c) = E::column(name) {
            if c.kind == value.kind() {
                qb.push(" AND ");
                qb.push(c.name);
                qb.push(" = ");
                push_value(qb, value);
            }
        }
    }
}

/// Append ` LIMIT $n OFFSET $m`.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Postgres>, skip: i64, limit: i64) {
    qb.push(" LIMIT ");
    qb.push_bind(limit.max(0));
    qb.push(" OFFSET ");
    qb.push_bind(skip.max(0));
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Id(v) => qb.push_bind(*v),
        FieldValue::Text(v) => qb.push_bind(v.clone()),
        FieldValue::Float(v) => qb.push_bind(*v),
        FieldValue::Date(v) => qb.push_bind(*v),
        FieldValue::Timestamp(v) => qb.push_bind(*v),
    };
}

/// Escape `LIKE` metacharacters (PostgreSQL's default escape is `\`).
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
