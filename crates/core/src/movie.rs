//! Movie field rules.
//!
//! Create and update share [`validate`]: a pure function from candidate
//! input to a [`MovieFields`] value that storage is allowed to persist.
//! Field rules are declared with `validator`; the name/description rule is a
//! schema-level check that only runs once every field rule has passed.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, ValidationFailure};

/// Entity name used in `NotFound` errors.
pub const ENTITY: &str = "Movie";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NAME_TOO_SHORT: &str = "Name is too short!";
pub const MSG_DESCRIPTION_TOO_SHORT: &str = "Description is too short!";
pub const MSG_NAME_EQUALS_DESCRIPTION: &str = "Name and description should be different!";

/// Key `validator` uses for schema-level errors.
const SCHEMA_KEY: &str = "__all__";

/// Movie fields as supplied by a client. Presence is checked by [`validate`].
///
/// Unknown keys (including `id`) are ignored, and an explicit `null` reads
/// the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl MovieInput {
    /// Overlay the supplied fields onto `base`, keeping base values for
    /// fields this input leaves out.
    pub fn merged_onto(&self, base: MovieInput) -> MovieInput {
        MovieInput {
            name: self.name.clone().or(base.name),
            description: self.description.clone().or(base.description),
            active: self.active.or(base.active),
        }
    }
}

/// A complete set of movie fields that passed every rule.
///
/// Only [`validate`] and [`validate_update`] construct this type, so a
/// store that accepts `&MovieFields` never writes unvalidated data.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
#[validate(schema(function = "name_differs_from_description"))]
pub struct MovieFields {
    #[validate(length(min = 2, message = "Name is too short!"))]
    name: String,
    #[validate(length(min = 2, message = "Description is too short!"))]
    description: String,
    active: bool,
}

impl MovieFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

fn name_differs_from_description(fields: &MovieFields) -> Result<(), ValidationError> {
    if fields.name == fields.description {
        let mut err = ValidationError::new("name_equals_description");
        err.message = Some(MSG_NAME_EQUALS_DESCRIPTION.into());
        return Err(err);
    }
    Ok(())
}

/// Validate a complete record (create or full update).
///
/// Every field must be present. Text is trimmed; blank text is rejected
/// before the length rules run. All field messages are collected together
/// and the object-level rule is only reported when no field failed.
pub fn validate(input: &MovieInput) -> Result<MovieFields, CoreError> {
    let mut failure = ValidationFailure::default();

    let name = required_text(&mut failure, "name", input.name.as_deref());
    let description = required_text(&mut failure, "description", input.description.as_deref());
    if input.active.is_none() {
        failure.add_field("active", MSG_REQUIRED);
    }

    // Fields that failed presence get placeholder values; their presence
    // message takes precedence over any rule message below.
    let candidate = MovieFields {
        name: name.unwrap_or_default(),
        description: description.unwrap_or_default(),
        active: input.active.unwrap_or_default(),
    };

    if let Err(errors) = candidate.validate() {
        absorb_rule_errors(&mut failure, &errors);
    }

    if failure.is_empty() {
        Ok(candidate)
    } else {
        Err(CoreError::Validation(failure))
    }
}

/// Validate an update against the `current` stored values.
///
/// A partial update merges `input` onto `current` first; a full update must
/// supply every field itself. Either way the resulting record goes through
/// [`validate`].
pub fn validate_update(
    current: MovieInput,
    input: &MovieInput,
    partial: bool,
) -> Result<MovieFields, CoreError> {
    if partial {
        validate(&input.merged_onto(current))
    } else {
        validate(input)
    }
}

fn required_text(failure: &mut ValidationFailure, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None => {
            failure.add_field(field, MSG_REQUIRED);
            None
        }
        Some("") => {
            failure.add_field(field, MSG_BLANK);
            None
        }
        Some(text) => Some(text.to_string()),
    }
}

fn absorb_rule_errors(failure: &mut ValidationFailure, errors: &ValidationErrors) {
    let mut general = None;

    for (field, errs) in errors.field_errors() {
        let field = field.to_string();
        let messages = errs.iter().map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string())
        });

        if field == SCHEMA_KEY {
            general = messages.into_iter().next();
        } else if failure.field(&field).is_empty() {
            for message in messages {
                failure.add_field(&field, message);
            }
        }
    }

    if !failure.has_field_errors() {
        failure.general = general;
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;
    use crate::error::NON_FIELD_ERRORS;

    fn input(name: &str, description: &str, active: bool) -> MovieInput {
        MovieInput {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            active: Some(active),
        }
    }

    fn failure_of(result: Result<MovieFields, CoreError>) -> ValidationFailure {
        match result {
            Err(CoreError::Validation(failure)) => failure,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_record() {
        let fields = validate(&input("Inception", "Dreams within dreams", true)).unwrap();
        assert_eq!(fields.name(), "Inception");
        assert_eq!(fields.description(), "Dreams within dreams");
        assert!(fields.active());
    }

    #[test]
    fn accepts_two_character_boundary() {
        assert!(validate(&input("Up", "Go", false)).is_ok());
    }

    #[test]
    fn rejects_short_name() {
        let failure = failure_of(validate(&input("A", "valid description", true)));
        assert_eq!(failure.field("name"), [MSG_NAME_TOO_SHORT]);
        assert!(failure.general.is_none());
    }

    #[test]
    fn rejects_short_description() {
        let failure = failure_of(validate(&input("Valid name", "x", true)));
        assert_eq!(failure.field("description"), [MSG_DESCRIPTION_TOO_SHORT]);
    }

    #[test]
    fn collects_all_field_errors_together() {
        let failure = failure_of(validate(&input("A", "B", true)));
        assert_eq!(failure.field("name"), [MSG_NAME_TOO_SHORT]);
        assert_eq!(failure.field("description"), [MSG_DESCRIPTION_TOO_SHORT]);
    }

    #[test]
    fn rejects_identical_name_and_description() {
        let failure = failure_of(validate(&input("Same", "Same", true)));
        assert!(!failure.has_field_errors());
        assert_eq!(failure.general.as_deref(), Some(MSG_NAME_EQUALS_DESCRIPTION));

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json[NON_FIELD_ERRORS][0], MSG_NAME_EQUALS_DESCRIPTION);
    }

    #[test]
    fn object_rule_skipped_while_fields_fail() {
        // Identical and too short: only the field rules are reported.
        let failure = failure_of(validate(&input("X", "X", true)));
        assert_eq!(failure.field("name"), [MSG_NAME_TOO_SHORT]);
        assert!(failure.general.is_none());
    }

    #[test]
    fn reports_missing_fields_as_required() {
        let failure = failure_of(validate(&MovieInput::default()));
        assert_eq!(failure.field("name"), [MSG_REQUIRED]);
        assert_eq!(failure.field("description"), [MSG_REQUIRED]);
        assert_eq!(failure.field("active"), [MSG_REQUIRED]);
    }

    #[test]
    fn blank_text_is_not_also_too_short() {
        let failure = failure_of(validate(&input("   ", "A fine description", true)));
        assert_eq!(failure.field("name"), [MSG_BLANK]);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let fields = validate(&input("  Heat ", "\tA heist film\n", true)).unwrap();
        assert_eq!(fields.name(), "Heat");
        assert_eq!(fields.description(), "A heist film");
    }

    #[test]
    fn trimmed_values_are_compared() {
        let failure = failure_of(validate(&input("Same ", " Same", true)));
        assert_eq!(failure.general.as_deref(), Some(MSG_NAME_EQUALS_DESCRIPTION));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let failure = failure_of(validate(&input("é", "Accented", true)));
        assert_eq!(failure.field("name"), [MSG_NAME_TOO_SHORT]);
    }

    #[test]
    fn deserializes_input_ignoring_id() {
        let parsed: MovieInput =
            serde_json::from_value(serde_json::json!({"id": 7, "active": false})).unwrap();
        assert_eq!(
            parsed,
            MovieInput {
                name: None,
                description: None,
                active: Some(false),
            }
        );
    }

    #[test]
    fn partial_update_keeps_unsupplied_fields() {
        let current = input("Alien", "In space no one can hear you scream", true);
        let patch = MovieInput {
            active: Some(false),
            ..Default::default()
        };

        let fields = validate_update(current, &patch, true).unwrap();
        assert_eq!(fields.name(), "Alien");
        assert_eq!(fields.description(), "In space no one can hear you scream");
        assert!(!fields.active());
    }

    #[test]
    fn partial_update_revalidates_merged_record() {
        let current = input("Alien", "Horror", true);
        let patch = MovieInput {
            description: Some("Alien".into()),
            ..Default::default()
        };

        let failure = failure_of(validate_update(current, &patch, true));
        assert_eq!(failure.general.as_deref(), Some(MSG_NAME_EQUALS_DESCRIPTION));
    }

    #[test]
    fn full_update_requires_every_field() {
        let current = input("Alien", "Horror", true);
        let patch = MovieInput {
            active: Some(false),
            ..Default::default()
        };

        let failure = failure_of(validate_update(current, &patch, false));
        assert_eq!(failure.field("name"), [MSG_REQUIRED]);
        assert_eq!(failure.field("description"), [MSG_REQUIRED]);
        assert!(failure.field("active").is_empty());
    }

    #[test]
    fn validation_error_is_core_validation_variant() {
        assert_matches!(
            validate(&input("A", "valid description", true)),
            Err(CoreError::Validation(_))
        );
    }

    proptest! {
        #[test]
        fn any_valid_record_is_accepted(
            name in "[a-z]{2,24}",
            description in "[A-Z][a-z ]{1,40}[a-z]",
            active in any::<bool>(),
        ) {
            let fields = validate(&input(&name, &description, active)).unwrap();
            prop_assert_eq!(fields.name(), name.as_str());
            prop_assert_eq!(fields.description(), description.as_str());
            prop_assert_eq!(fields.active(), active);
        }

        #[test]
        fn single_character_name_is_always_rejected(
            name in "[a-zA-Z0-9]",
            description in "[a-z]{2,24}",
        ) {
            let failure = failure_of(validate(&input(&name, &description, true)));
            prop_assert_eq!(failure.field("name"), [MSG_NAME_TOO_SHORT]);
        }
    }
}
