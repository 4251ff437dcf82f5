//! Domain types and pure validation logic for the movie service.
//!
//! Nothing in this crate touches the database or the network.

pub mod error;
pub mod movie;
pub mod types;
