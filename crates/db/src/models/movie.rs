//! Movie entity model.

use serde::Serialize;
use sqlx::FromRow;
use watchmate_core::movie::{MovieFields, MovieInput};
use watchmate_core::types::DbId;

/// A movie row from the `movies` table.
///
/// Serializes to the public record shape
/// `{"id", "name", "description", "active"}`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub active: bool,
}

impl Movie {
    /// Build a row from validated fields and an assigned id.
    pub fn from_fields(id: DbId, fields: &MovieFields) -> Self {
        Self {
            id,
            name: fields.name().to_string(),
            description: fields.description().to_string(),
            active: fields.active(),
        }
    }

    /// The stored values as a fully populated input, used as the base of a
    /// partial update.
    pub fn to_input(&self) -> MovieInput {
        MovieInput {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            active: Some(self.active),
        }
    }
}
