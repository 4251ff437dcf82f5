//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async SQL methods.
//! Plain reads and writes take `&PgPool`; steps that must share a
//! transaction take `&mut PgConnection`.

pub mod movie_repo;

pub use movie_repo::MovieRepo;
