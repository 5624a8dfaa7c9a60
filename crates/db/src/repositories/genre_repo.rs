//! Genres need nothing beyond the generic repository.

use async_trait::async_trait;
use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::entity::{NoRelations, Related};
use crate::models::genre::Genre;
use crate::repositories::generic::Repo;

pub type GenreRepo = Repo<Genre>;

#[async_trait]
impl Related for Genre {
    type Relations = NoRelations;

    async fn load_relations(
        _conn: &mut PgConnection,
        _id: DbId,
    ) -> Result<NoRelations, sqlx::Error> {
        Ok(NoRelations {})
    }
}
