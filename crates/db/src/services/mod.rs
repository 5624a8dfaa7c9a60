//! Business services.
//!
//! A service borrows one connection (usually the transaction of a
//! [`crate::UnitOfWork`]), turns request DTOs into field maps, and composes
//! repository calls into the views handlers return.

pub mod crud;
pub mod film;
pub mod genre;
pub mod person;

pub use crud::CrudService;
pub use film::FilmService;
pub use genre::GenreService;
pub use person::PersonService;
