//! Row models.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Client input DTOs live with their validation rules in
//! `watchmate_core`.

pub mod movie;
