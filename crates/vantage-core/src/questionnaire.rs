//! # Questionnaire Module
//!
//! Step definitions for the multi-step assessment.
//!
//! A questionnaire is an ordered, fixed sequence of steps. Every step but
//! the last holds input fields; the last step is the results panel and is
//! where the rendered [`crate::Assessment`] goes.

use crate::field::{Field, FieldKind};
use crate::{AssessmentError, FieldName, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One panel of the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    /// Fields in document order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Step {
    /// Create a step with the given fields.
    #[must_use]
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }

    /// Create the field-less results step.
    #[must_use]
    pub fn results(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }
}

/// An ordered sequence of steps ending with the results step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub title: String,
    pub steps: Vec<Step>,
}

impl Questionnaire {
    /// Create a questionnaire and check its structure.
    pub fn new(title: impl Into<String>, steps: Vec<Step>) -> Result<Self, AssessmentError> {
        let questionnaire = Self {
            title: title.into(),
            steps,
        };
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    /// Check the structural rules:
    /// - at least one step
    /// - the last step has no fields
    /// - field names are unique across all steps
    /// - choice fields declare at least one option, each distinct and
    ///   free of surrounding whitespace
    pub fn validate(&self) -> Result<(), AssessmentError> {
        let last = self
            .steps
            .last()
            .ok_or(AssessmentError::EmptyQuestionnaire)?;
        if !last.fields.is_empty() {
            return Err(AssessmentError::MissingResultsStep);
        }

        let mut seen = BTreeSet::new();
        for field in self.fields() {
            if !seen.insert(&field.name) {
                return Err(AssessmentError::DuplicateField(field.name.0.clone()));
            }
            validate_options(field)?;
        }
        Ok(())
    }

    /// Number of steps, results step included.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Index of the results step.
    #[must_use]
    pub fn results_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Get a step by index.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// All fields of all steps, in document order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.steps.iter().flat_map(|step| step.fields.iter())
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&Field> {
        self.fields().find(|field| &field.name == name)
    }

    /// The built-in observability maturity assessment.
    #[must_use]
    pub fn observability() -> Self {
        Self {
            title: "Observability Maturity Assessment".to_string(),
            steps: vec![
                Step::new(
                    "Visibility",
                    vec![
                        rating("visibility", 1..=5)
                            .with_label(
                                "How much visibility do you have into your systems? (1 = none, 5 = full)",
                            )
                            .required(),
                    ],
                ),
                Step::new(
                    "Capabilities",
                    vec![
                        tokens(
                            "capabilities",
                            &["dashboard", "alerts", "rootcause", "monitoring", "integration"],
                        )
                        .with_label("Which capabilities do you have today?"),
                    ],
                ),
                Step::new(
                    "Scale & Availability",
                    vec![
                        rating("scale", 1..=3)
                            .with_label("How large is your environment? (1 = small, 3 = large)")
                            .required(),
                        rating("downtime", 0..=3)
                            .with_label(
                                "How well do you avoid unplanned downtime? (0 = frequent outages, 3 = rare)",
                            )
                            .required(),
                    ],
                ),
                Step::new(
                    "Tooling & Teams",
                    vec![
                        rating("toolsCount", 0..=3)
                            .with_label(
                                "How consolidated is your monitoring tooling? (0 = many silos, 3 = one platform)",
                            )
                            .required(),
                        rating("collaboration", 0..=3)
                            .with_label(
                                "How well do teams share operational data? (0 = not at all, 3 = seamlessly)",
                            )
                            .required(),
                    ],
                ),
                Step::new(
                    "Alerting & Resolution",
                    vec![
                        rating("alertNoise", 0..=3)
                            .with_label(
                                "How actionable are your alerts? (0 = mostly noise, 3 = all actionable)",
                            )
                            .required(),
                        rating("resolution", 0..=3)
                            .with_label(
                                "How quickly do you resolve incidents? (0 = days, 3 = minutes)",
                            )
                            .required(),
                    ],
                ),
                Step::new(
                    "Challenges",
                    vec![
                        tokens(
                            "challenges",
                            &["expertise", "tools", "costs", "resolution", "visibility"],
                        )
                        .with_label("Which challenges do you face?"),
                    ],
                ),
                Step::new(
                    "About You",
                    vec![
                        Field::new("name", FieldKind::FreeText { numeric: false })
                            .with_label("Your name")
                            .required(),
                        Field::new("email", FieldKind::FreeText { numeric: false })
                            .with_label("Work email")
                            .required(),
                        Field::new("company", FieldKind::FreeText { numeric: false })
                            .with_label("Company"),
                        Field::new("employees", FieldKind::FreeText { numeric: true })
                            .with_label("Number of employees"),
                        Field::new("consent", FieldKind::BinaryConsent)
                            .with_label("I agree to be contacted about my results")
                            .required(),
                    ],
                ),
                Step::results("Your Results"),
            ],
        }
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::observability()
    }
}

fn rating(name: &str, range: std::ops::RangeInclusive<u8>) -> Field {
    Field::new(
        name,
        FieldKind::ExclusiveChoice {
            options: range.map(|value| Token::new(value.to_string())).collect(),
        },
    )
}

fn tokens(name: &str, options: &[&str]) -> Field {
    Field::new(
        name,
        FieldKind::MultiSelect {
            options: options.iter().map(|option| Token::new(*option)).collect(),
        },
    )
}

// =============================================================================
// TESTS
// =============================================================================

/// Every declared option of a choice field must be selectable.
fn validate_options(field: &Field) -> Result<(), AssessmentError> {
    let invalid = |reason: String| AssessmentError::InvalidOptions {
        field: field.name.0.clone(),
        reason,
    };
    let options = match &field.kind {
        FieldKind::ExclusiveChoice { options } | FieldKind::MultiSelect { options } => options,
        FieldKind::BinaryConsent | FieldKind::FreeText { .. } => return Ok(()),
    };
    if options.is_empty() {
        return Err(invalid("no options".to_string()));
    }

    let mut seen = BTreeSet::new();
    for option in options {
        let text = option.as_str();
        if text.is_empty() || text.trim() != text {
            return Err(invalid(format!("blank or padded option '{}'", text)));
        }
        if !seen.insert(option) {
            return Err(invalid(format!("duplicate option '{}'", text)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_questionnaire_is_valid() {
        let questionnaire = Questionnaire::observability();
        assert!(questionnaire.validate().is_ok());
        assert_eq!(questionnaire.step_count(), 8);
        assert_eq!(questionnaire.results_index(), 7);
    }

    #[test]
    fn builtin_questionnaire_declares_every_scored_field() {
        let questionnaire = Questionnaire::observability();
        for name in crate::scoring::RATING_FIELDS {
            assert!(
                questionnaire.field(&FieldName::new(name)).is_some(),
                "missing rating field {name}"
            );
        }
        assert!(questionnaire.field(&FieldName::new("capabilities")).is_some());
        assert!(questionnaire.field(&FieldName::new("challenges")).is_some());
    }

    #[test]
    fn empty_questionnaire_rejected() {
        let result = Questionnaire::new("empty", Vec::new());
        assert!(matches!(result, Err(AssessmentError::EmptyQuestionnaire)));
    }

    #[test]
    fn last_step_must_be_results() {
        let result = Questionnaire::new(
            "no results",
            vec![Step::new(
                "only",
                vec![Field::new("name", FieldKind::FreeText { numeric: false })],
            )],
        );
        assert!(matches!(result, Err(AssessmentError::MissingResultsStep)));
    }

    #[test]
    fn duplicate_names_rejected_across_steps() {
        let text = || Field::new("name", FieldKind::FreeText { numeric: false });
        let result = Questionnaire::new(
            "dupes",
            vec![
                Step::new("a", vec![text()]),
                Step::new("b", vec![text()]),
                Step::results("done"),
            ],
        );
        assert!(matches!(result, Err(AssessmentError::DuplicateField(name)) if name == "name"));
    }

    #[test]
    fn choice_without_options_rejected() {
        let result = Questionnaire::new(
            "no options",
            vec![
                Step::new(
                    "a",
                    vec![
                        Field::new("visibility", FieldKind::ExclusiveChoice { options: vec![] })
                            .required(),
                    ],
                ),
                Step::results("done"),
            ],
        );
        assert!(matches!(
            result,
            Err(AssessmentError::InvalidOptions { field, .. }) if field == "visibility"
        ));
    }

    #[test]
    fn duplicate_or_padded_options_rejected() {
        let with_options = |options: &[&str]| {
            Questionnaire::new(
                "options",
                vec![
                    Step::new(
                        "a",
                        vec![Field::new(
                            "capabilities",
                            FieldKind::MultiSelect {
                                options: options.iter().map(|o| Token::new(*o)).collect(),
                            },
                        )],
                    ),
                    Step::results("done"),
                ],
            )
        };

        assert!(matches!(
            with_options(&["alerts", "dashboard", "alerts"]),
            Err(AssessmentError::InvalidOptions { reason, .. }) if reason == "duplicate option 'alerts'"
        ));
        assert!(matches!(
            with_options(&["alerts", " dashboard"]),
            Err(AssessmentError::InvalidOptions { .. })
        ));
        assert!(matches!(
            with_options(&["alerts", ""]),
            Err(AssessmentError::InvalidOptions { .. })
        ));
        assert!(with_options(&["very high", "low"]).is_ok());
    }

    #[test]
    fn single_results_step_is_allowed() {
        let questionnaire =
            Questionnaire::new("results only", vec![Step::results("done")]).expect("valid");
        assert_eq!(questionnaire.step_count(), 1);
        assert_eq!(questionnaire.results_index(), 0);
    }
}
