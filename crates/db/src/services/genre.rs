use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::fields::Filters;
use crate::models::genre::{CreateGenre, Genre, UpdateGenre};
use crate::services::CrudService;

/// Genre operations. Everything maps 1:1 onto the generic service.
pub struct GenreService<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> GenreService<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    fn crud(&mut self) -> CrudService<'_, Genre> {
        CrudService::new(&mut *self.conn)
    }

    pub async fn get_genres(&mut self, skip: i64, limit: i64) -> Result<Vec<Genre>, sqlx::Error> {
        self.crud().list(skip, limit, &Filters::new()).await
    }

    pub async fn get_genre(&mut self, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        self.crud().get(id).await
    }

    pub async fn create_genre(&mut self, input: CreateGenre) -> Result<Genre, sqlx::Error> {
        self.crud().create(input).await
    }

    pub async fn update_genre(
        &mut self,
        id: DbId,
        input: UpdateGenre,
    ) -> Result<Option<Genre>, sqlx::Error> {
        self.crud().update(id, input).await
    }

    pub async fn delete_genre(&mut self, id: DbId) -> Result<bool, sqlx::Error> {
        self.crud().delete(id).await
    }

    pub async fn bulk_delete(&mut self, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        self.crud().bulk_delete(ids).await
    }

    pub async fn count(&mut self) -> Result<i64, sqlx::Error> {
        self.crud().count(&Filters::new()).await
    }
}
