use std::marker::PhantomData;

use filmcat_core::pagination::{page_to_skip, Page};
use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::entity::{Entity, Related, WithRelations};
use crate::fields::{Filters, IntoFieldMap};
use crate::repositories::Repo;

/// Entity-agnostic service over [`Repo<E>`].
///
/// The entity services delegate their plain CRUD operations here.
pub struct CrudService<'a, E> {
    conn: &'a mut PgConnection,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> CrudService<'a, E> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    pub async fn list(
        &mut self,
        skip: i64,
        limit: i64,
        filters: &Filters,
    ) -> Result<Vec<E>, sqlx::Error> {
        Repo::<E>::list(&mut *self.conn, skip, limit, filters).await
    }

    pub async fn get(&mut self, id: DbId) -> Result<Option<E>, sqlx::Error> {
        Repo::<E>::get_by_id(&mut *self.conn, id).await
    }

    pub async fn create<P: IntoFieldMap>(&mut self, payload: P) -> Result<E, sqlx::Error> {
        let fields = payload.into_field_map();
        let entity = Repo::<E>::create(&mut *self.conn, &fields).await?;
        tracing::info!(entity = E::NAME, id = %entity.id(), "Created");
        Ok(entity)
    }

    /// Apply only the fields the payload carries. `None` when the row is absent.
    pub async fn update<P: IntoFieldMap>(
        &mut self,
        id: DbId,
        payload: P,
    ) -> Result<Option<E>, sqlx::Error> {
        let fields = payload.into_field_map();
        let updated = Repo::<E>::update(&mut *self.conn, id, &fields).await?;
        if updated.is_some() {
            tracing::info!(entity = E::NAME, %id, fields = fields.len(), "Updated");
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = Repo::<E>::delete(&mut *self.conn, id).await?;
        if deleted {
            tracing::info!(entity = E::NAME, %id, "Deleted");
        }
        Ok(deleted)
    }

    pub async fn bulk_delete(&mut self, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        Repo::<E>::bulk_delete(&mut *self.conn, ids).await
    }

    pub async fn count(&mut self, filters: &Filters) -> Result<i64, sqlx::Error> {
        Repo::<E>::count(&mut *self.conn, filters).await
    }

    /// Fetch one 1-based page together with the total row count.
    pub async fn paginated(
        &mut self,
        page: i64,
        page_size: i64,
        filters: &Filters,
    ) -> Result<Page<E>, sqlx::Error> {
        let skip = page_to_skip(page, page_size);
        let items = self.list(skip, page_size, filters).await?;
        let total = self.count(filters).await?;
        Ok(Page::new(items, total, page, page_size))
    }
}

impl<'a, E: Related> CrudService<'a, E> {
    pub async fn get_with_relations(
        &mut self,
        id: DbId,
    ) -> Result<Option<WithRelations<E>>, sqlx::Error> {
        Repo::<E>::get_with_relations(&mut *self.conn, id).await
    }
}
