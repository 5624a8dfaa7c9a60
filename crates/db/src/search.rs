//! Pluggable semantic search over film descriptions.
//!
//! The catalog never ranks films by meaning itself. A deployment may inject
//! an implementation of [`SemanticSearch`]; otherwise [`NoSemanticSearch`]
//! answers every query with no results and reports itself unavailable.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgConnection;

use crate::models::film::Film;

/// A film paired with its similarity to the query, higher is closer.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredFilm {
    pub film: Film,
    pub score: f64,
}

/// Ranks films by how well their description matches free text.
#[async_trait]
pub trait SemanticSearch: Send + Sync {
    /// Whether the capability is backed by a real search engine.
    fn is_available(&self) -> bool {
        true
    }

    /// Return at most `limit` films, best match first.
    async fn search_by_description(
        &self,
        conn: &mut PgConnection,
        description: &str,
        limit: i64,
    ) -> Result<Vec<ScoredFilm>, sqlx::Error>;
}

/// Shared handle to the configured search capability.
pub type SearchHandle = Arc<dyn SemanticSearch>;

/// Fallback capability used when no search engine is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSemanticSearch;

#[async_trait]
impl SemanticSearch for NoSemanticSearch {
    fn is_available(&self) -> bool {
        false
    }

    async fn search_by_description(
        &self,
        _conn: &mut PgConnection,
        description: &str,
        _limit: i64,
    ) -> Result<Vec<ScoredFilm>, sqlx::Error> {
        tracing::debug!(description, "Semantic search not configured, returning no results");
        Ok(Vec::new())
    }
}

/// Handle to the no-op capability.
pub fn no_search() -> SearchHandle {
    Arc::new(NoSemanticSearch)
}
