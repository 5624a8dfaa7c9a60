//! Repository layer.
//!
//! Repositories are zero-sized structs providing async methods that accept
//! `&mut PgConnection` as the first argument, so the same code runs against
//! a pooled connection or inside a [`crate::UnitOfWork`] transaction.
//! Repositories never commit; transaction boundaries belong to the caller.

pub mod film_repo;
pub mod generic;
pub mod genre_repo;
pub mod link_repo;
pub mod person_repo;

pub use film_repo::{FilmListParams, FilmRepo};
pub use generic::Repo;
pub use genre_repo::GenreRepo;
pub use link_repo::LinkRepo;
pub use person_repo::PersonRepo;
