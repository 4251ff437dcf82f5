use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::DbId;

/// Key under which object-level validation messages are reported.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Every rule violation found while validating one record.
///
/// Field-level messages are grouped by field name. The object-level message,
/// if any, serializes as a single-element list under [`NON_FIELD_ERRORS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<String>>,
    #[serde(
        rename = "non_field_errors",
        skip_serializing_if = "Option::is_none",
        serialize_with = "general_as_list"
    )]
    pub general: Option<String>,
}

impl ValidationFailure {
    /// Append a message to the list for `field`.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`, empty if the field passed.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_field_errors(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        if let Some(general) = &self.general {
            parts.push(format!("{NON_FIELD_ERRORS}: {general}"));
        }
        f.write_str(&parts.join("; "))
    }
}

fn general_as_list<S: Serializer>(general: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(general.iter())
}
