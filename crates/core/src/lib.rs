//! Domain primitives shared by the repository layer and the HTTP server.
//!
//! Nothing in here talks to the database; everything is plain data and
//! pure functions so it can be unit tested without PostgreSQL.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod sorting;
pub mod types;
pub mod validation;
