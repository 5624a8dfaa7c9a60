//! Transactional grouping of the entity services.
//!
//! A [`UnitOfWork`] owns one database transaction and hands out services
//! bound to it. [`UnitOfWork::commit`] and [`UnitOfWork::rollback`] consume
//! it; dropping it without either rolls the transaction back and returns the
//! connection to the pool.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::search::SearchHandle;
use crate::services::{FilmService, GenreService, PersonService};

/// One transaction plus the services that run inside it.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
    search: SearchHandle,
}

impl UnitOfWork {
    /// Start a transaction on a pooled connection.
    pub async fn begin(pool: &PgPool, search: SearchHandle) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;
        Ok(Self { tx, search })
    }

    pub fn films(&mut self) -> FilmService<'_> {
        FilmService::new(&mut *self.tx, self.search.clone())
    }

    pub fn genres(&mut self) -> GenreService<'_> {
        GenreService::new(&mut *self.tx)
    }

    pub fn persons(&mut self) -> PersonService<'_> {
        PersonService::new(&mut *self.tx)
    }

    /// Raw access for repository calls that have no service wrapper.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}

/// Creates units of work. Cloned into every request via application state.
#[derive(Clone)]
pub struct UnitOfWorkProvider {
    pool: PgPool,
    search: SearchHandle,
}

impl UnitOfWorkProvider {
    pub fn new(pool: PgPool, search: SearchHandle) -> Self {
        Self { pool, search }
    }

    pub async fn begin(&self) -> Result<UnitOfWork, sqlx::Error> {
        UnitOfWork::begin(&self.pool, self.search.clone()).await
    }

    /// Run `f` inside a fresh unit of work.
    ///
    /// Commits when `f` returns `Ok`, rolls back and returns the error when it
    /// returns `Err`. The connection goes back to the pool either way.
    ///
    /// ```ignore
    /// let genre = provider
    ///     .scope(|uow| Box::pin(async move { uow.genres().create_genre(input).await }))
    ///     .await?;
    /// ```
    pub async fn scope<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: for<'u> FnOnce(&'u mut UnitOfWork) -> BoxFuture<'u, Result<T, E>> + Send,
        T: Send,
        E: From<sqlx::Error> + Send,
    {
        let mut uow = self.begin().await?;
        match f(&mut uow).await {
            Ok(value) => {
                uow.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    pub fn search(&self) -> &SearchHandle {
        &self.search
    }
}
