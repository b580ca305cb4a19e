//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the assessment engine:
//! - Field identifiers and option tokens (`FieldName`, `Token`)
//! - Error types (`AssessmentError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Carry no floating-point data

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Name of a form field.
///
/// Fields sharing a name form a group; for exclusive choices the group
/// holds at most one selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(pub String);

impl FieldName {
    /// Create a new field name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the field name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One selectable option value, e.g. `dashboard` or `3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl Token {
    /// Create a new token.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Vantage system.
///
/// Unmet required fields are NOT errors: they are reported through
/// [`crate::Validation`] values. These variants cover malformed definitions,
/// calls naming fields that do not exist, and I/O at the app boundary.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The questionnaire has no steps at all.
    #[error("Questionnaire has no steps")]
    EmptyQuestionnaire,

    /// The last step must be the field-less results step.
    #[error("Last step must be a results step without fields")]
    MissingResultsStep,

    /// Two fields in the questionnaire share a name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// The named field is not declared by any step.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The operation does not apply to this kind of field.
    #[error("Field '{field}' is not a {expected} field")]
    FieldKindMismatch { field: String, expected: &'static str },

    /// The option is not one of the field's declared options.
    #[error("Field '{field}' has no option '{option}'")]
    UnknownOption { field: String, option: String },

    /// A choice field declares no options, a duplicate option, or an option
    /// that cannot be typed back (blank or padded with whitespace).
    #[error("Field '{field}' has invalid options: {reason}")]
    InvalidOptions { field: String, reason: String },

    /// The field exists but belongs to a step that is not showing.
    #[error("Field '{0}' is not on the current step")]
    FieldNotOnStep(String),

    /// A multi-select toggle named no option.
    #[error("Field '{0}' needs an option")]
    MissingOption(String),

    /// Category bounds must strictly ascend.
    #[error("Category thresholds must ascend: {reactive_max} < {basic_max} < {intermediate_max}")]
    InvalidThresholds {
        reactive_max: i64,
        basic_max: i64,
        intermediate_max: i64,
    },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_order_lexically() {
        let mut names = vec![
            FieldName::new("scale"),
            FieldName::new("alertNoise"),
            FieldName::new("visibility"),
        ];
        names.sort();
        let sorted: Vec<_> = names.iter().map(FieldName::as_str).collect();
        assert_eq!(sorted, vec!["alertNoise", "scale", "visibility"]);
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = AssessmentError::UnknownOption {
            field: "scale".to_string(),
            option: "9".to_string(),
        };
        assert_eq!(err.to_string(), "Field 'scale' has no option '9'");

        let err = AssessmentError::FieldKindMismatch {
            field: "email".to_string(),
            expected: "choice",
        };
        assert_eq!(err.to_string(), "Field 'email' is not a choice field");

        let err = AssessmentError::InvalidOptions {
            field: "level".to_string(),
            reason: "no options".to_string(),
        };
        assert_eq!(err.to_string(), "Field 'level' has invalid options: no options");
    }
}
