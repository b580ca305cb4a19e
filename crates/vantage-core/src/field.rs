//! # Field Module
//!
//! Tagged field variants and their validation rules.
//!
//! Each field carries its own rule instead of branching on a type string at
//! the call site:
//!
//! | Kind | Input | Required means |
//! |------|-------|----------------|
//! | `ExclusiveChoice` | at most one option | exactly one option selected |
//! | `MultiSelect` | any subset of options | at least one option selected |
//! | `BinaryConsent` | checked flag | checked |
//! | `FreeText` | string | non-empty string |

use crate::{FieldName, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// FIELD KIND
// =============================================================================

/// The kind of a field, with the data its validation rule needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Radio-like group: one option from `options`.
    ExclusiveChoice { options: Vec<Token> },
    /// Checkbox group sharing a name: any subset of `options`.
    MultiSelect { options: Vec<Token> },
    /// A single consent checkbox.
    BinaryConsent,
    /// Text entry. `numeric` fields only accept number literals.
    FreeText {
        #[serde(default)]
        numeric: bool,
    },
}

impl FieldKind {
    /// Short name used in error messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::ExclusiveChoice { .. } => "choice",
            FieldKind::MultiSelect { .. } => "multi-select",
            FieldKind::BinaryConsent => "consent",
            FieldKind::FreeText { .. } => "text",
        }
    }

    /// Declared options, empty for consent and text fields.
    #[must_use]
    pub fn options(&self) -> &[Token] {
        match self {
            FieldKind::ExclusiveChoice { options } | FieldKind::MultiSelect { options } => {
                options
            }
            FieldKind::BinaryConsent | FieldKind::FreeText { .. } => &[],
        }
    }

    fn has_option(&self, token: &Token) -> bool {
        self.options().contains(token)
    }
}

// =============================================================================
// FIELD INPUT
// =============================================================================

/// The live value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldInput {
    /// Selected option of an exclusive group, if any.
    Choice(Option<Token>),
    /// Selected tokens of a multi-select group.
    Tokens(BTreeSet<Token>),
    /// Consent checkbox state.
    Checked(bool),
    /// Text content.
    Text(String),
}

// =============================================================================
// FIELD
// =============================================================================

/// A named input within a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: FieldName,
    /// Prompt shown next to the input.
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl Field {
    /// Create an optional field with an empty label.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: FieldName::new(name),
            label: String::new(),
            kind,
            required: false,
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the prompt label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The input a freshly rendered form holds for this field.
    #[must_use]
    pub fn blank_input(&self) -> FieldInput {
        match self.kind {
            FieldKind::ExclusiveChoice { .. } => FieldInput::Choice(None),
            FieldKind::MultiSelect { .. } => FieldInput::Tokens(BTreeSet::new()),
            FieldKind::BinaryConsent => FieldInput::Checked(false),
            FieldKind::FreeText { .. } => FieldInput::Text(String::new()),
        }
    }

    /// Whether `input` would satisfy this field if it were required.
    #[must_use]
    pub fn is_satisfied(&self, input: &FieldInput) -> bool {
        match (&self.kind, input) {
            (FieldKind::ExclusiveChoice { .. }, FieldInput::Choice(selected)) => {
                selected.is_some()
            }
            (FieldKind::MultiSelect { .. }, FieldInput::Tokens(tokens)) => !tokens.is_empty(),
            (FieldKind::BinaryConsent, FieldInput::Checked(checked)) => *checked,
            (FieldKind::FreeText { .. }, FieldInput::Text(text)) => !text.is_empty(),
            _ => false,
        }
    }

    /// Required-field rule: the field is required and not satisfied.
    #[must_use]
    pub fn is_missing(&self, input: &FieldInput) -> bool {
        self.required && !self.is_satisfied(input)
    }

    /// Broader validity predicate used to pick the field to report.
    ///
    /// A field is invalid when it is missing, or when its value is
    /// malformed even though the field is optional: a numeric text that is
    /// not a number, or a selection outside the declared options.
    #[must_use]
    pub fn is_invalid(&self, input: &FieldInput) -> bool {
        self.is_missing(input) || self.is_malformed(input)
    }

    fn is_malformed(&self, input: &FieldInput) -> bool {
        match (&self.kind, input) {
            (FieldKind::ExclusiveChoice { .. }, FieldInput::Choice(selected)) => selected
                .as_ref()
                .is_some_and(|token| !self.kind.has_option(token)),
            (FieldKind::MultiSelect { .. }, FieldInput::Tokens(tokens)) => {
                tokens.iter().any(|token| !self.kind.has_option(token))
            }
            (FieldKind::BinaryConsent, FieldInput::Checked(_)) => false,
            (FieldKind::FreeText { numeric }, FieldInput::Text(text)) => {
                *numeric && !text.is_empty() && !is_number_literal(text)
            }
            _ => true,
        }
    }
}

/// Accepts `[+-]digits[.digits]` with at least one digit.
fn is_number_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    match fraction {
        Some(fraction) => {
            all_digits(whole) && all_digits(fraction) && !(whole.is_empty() && fraction.is_empty())
        }
        None => !whole.is_empty() && all_digits(whole),
    }
}

// =============================================================================
// TESTS
// =============================================================================
