//! Role strings carried by `person_film_work` link rows.
//!
//! The store does not constrain the column, so any string is accepted on
//! write. Film detail assembly only looks up the three well-known roles.

pub const ROLE_ACTOR: &str = "actor";
pub const ROLE_WRITER: &str = "writer";
pub const ROLE_DIRECTOR: &str = "director";
