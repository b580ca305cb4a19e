//! # Form Module
//!
//! Live input state of the questionnaire and the Answer Set gathered from it.
//!
//! - `FormState` holds what the user has entered so far, per field
//! - `AnswerSet` is the submitted view: collected once, from ALL steps

use crate::field::{FieldInput, FieldKind};
use crate::questionnaire::Questionnaire;
use crate::{AssessmentError, Field, FieldName, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value a checked consent box submits.
pub const CHECKED_VALUE: &str = "on";

// =============================================================================
// FORM STATE
// =============================================================================

/// Current input of every field the user has touched.
///
/// Untouched fields read as their blank input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    inputs: BTreeMap<FieldName, FieldInput>,
}

impl FormState {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input of a field.
    #[must_use]
    pub fn input(&self, field: &Field) -> FieldInput {
        self.inputs
            .get(&field.name)
            .cloned()
            .unwrap_or_else(|| field.blank_input())
    }

    /// Select one option of an exclusive group, replacing any previous one.
    pub fn select(
        &mut self,
        questionnaire: &Questionnaire,
        name: &FieldName,
        option: Token,
    ) -> Result<(), AssessmentError> {
        let field = lookup(questionnaire, name)?;
        if !matches!(field.kind, FieldKind::ExclusiveChoice { .. }) {
            return Err(mismatch(field, "choice"));
        }
        check_option(field, &option)?;
        self.inputs.insert(name.clone(), FieldInput::Choice(Some(option)));
        Ok(())
    }

    /// Flip one token of a multi-select group. Returns the new state.
    pub fn toggle(
        &mut self,
        questionnaire: &Questionnaire,
        name: &FieldName,
        token: Token,
    ) -> Result<bool, AssessmentError> {
        let field = lookup(questionnaire, name)?;
        if !matches!(field.kind, FieldKind::MultiSelect { .. }) {
            return Err(mismatch(field, "multi-select"));
        }
        check_option(field, &token)?;

        let mut tokens = match self.input(field) {
            FieldInput::Tokens(tokens) => tokens,
            _ => Default::default(),
        };
        let selected = if tokens.remove(&token) {
            false
        } else {
            tokens.insert(token);
            true
        };
        self.inputs.insert(name.clone(), FieldInput::Tokens(tokens));
        Ok(selected)
    }

    /// Check or uncheck a consent box.
    pub fn set_checked(
        &mut self,
        questionnaire: &Questionnaire,
        name: &FieldName,
        checked: bool,
    ) -> Result<(), AssessmentError> {
        let field = lookup(questionnaire, name)?;
        if field.kind != FieldKind::BinaryConsent {
            return Err(mismatch(field, "consent"));
        }
        self.inputs.insert(name.clone(), FieldInput::Checked(checked));
        Ok(())
    }

    /// Replace the content of a text field.
    pub fn set_text(
        &mut self,
        questionnaire: &Questionnaire,
        name: &FieldName,
        text: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        let field = lookup(questionnaire, name)?;
        if !matches!(field.kind, FieldKind::FreeText { .. }) {
            return Err(mismatch(field, "text"));
        }
        self.inputs.insert(name.clone(), FieldInput::Text(text.into()));
        Ok(())
    }
}

fn lookup<'q>(
    questionnaire: &'q Questionnaire,
    name: &FieldName,
) -> Result<&'q Field, AssessmentError> {
    questionnaire
        .field(name)
        .ok_or_else(|| AssessmentError::UnknownField(name.0.clone()))
}

fn mismatch(field: &Field, expected: &'static str) -> AssessmentError {
    AssessmentError::FieldKindMismatch {
        field: field.name.0.clone(),
        expected,
    }
}

fn check_option(field: &Field, option: &Token) -> Result<(), AssessmentError> {
    if field.kind.options().contains(option) {
        Ok(())
    } else {
        Err(AssessmentError::UnknownOption {
            field: field.name.0.clone(),
            option: option.0.clone(),
        })
    }
}

// =============================================================================
// ANSWER SET
// =============================================================================

/// Submitted answers: field name to one or more values.
///
/// Serializes as a map of value lists. Deserializes from a map whose values
/// are strings, numbers, booleans or string lists, so hand-written answer
/// files can say `visibility = 5` or `consent = true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<FieldName, AnswerValue>",
    into = "BTreeMap<FieldName, Vec<String>>"
)]
pub struct AnswerSet {
    values: BTreeMap<FieldName, Vec<String>>,
}

impl AnswerSet {
    /// Create an empty answer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build answers from `(name, values)` pairs.
    pub fn from_pairs<N, V, I>(pairs: impl IntoIterator<Item = (N, I)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        let values = pairs
            .into_iter()
            .map(|(name, values)| {
                (
                    FieldName::new(name),
                    values.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { values }
    }

    /// Gather the submitted answers of every step.
    ///
    /// Mirrors a browser form submission:
    /// - unselected choices and unchecked consent boxes are absent
    /// - text fields are present even when empty
    /// - multi-select tokens follow the order the options are presented in
    #[must_use]
    pub fn collect(questionnaire: &Questionnaire, form: &FormState) -> Self {
        let mut values = BTreeMap::new();

        for field in questionnaire.fields() {
            let submitted: Vec<String> = match (&field.kind, form.input(field)) {
                (_, FieldInput::Choice(selected)) => {
                    selected.into_iter().map(|token| token.0).collect()
                }
                (kind, FieldInput::Tokens(tokens)) => kind
                    .options()
                    .iter()
                    .filter(|option| tokens.contains(*option))
                    .map(|option| option.0.clone())
                    .collect(),
                (_, FieldInput::Checked(checked)) => {
                    if checked {
                        vec![CHECKED_VALUE.to_string()]
                    } else {
                        Vec::new()
                    }
                }
                (_, FieldInput::Text(text)) => vec![text],
            };

            if !submitted.is_empty() {
                values.insert(field.name.clone(), submitted);
            }
        }

        Self { values }
    }

    /// First value submitted under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values submitted under `name`, empty if none.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values
            .get(&FieldName::new(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `token` is among the values of `name`.
    #[must_use]
    pub fn contains(&self, name: &str, token: &str) -> bool {
        self.get_all(name).iter().any(|value| value == token)
    }

    /// Number of answered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One answer as written in an answers file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// `true` submits like a checked box, `false` like an unchecked one.
    Flag(bool),
    Number(i64),
    Decimal(f64),
    Text(String),
    List(Vec<String>),
}

impl From<BTreeMap<FieldName, AnswerValue>> for AnswerSet {
    fn from(raw: BTreeMap<FieldName, AnswerValue>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(name, value)| {
                let list = match value {
                    AnswerValue::Flag(true) => vec![CHECKED_VALUE.to_string()],
                    AnswerValue::Flag(false) => return None,
                    AnswerValue::Number(n) => vec![n.to_string()],
                    AnswerValue::Decimal(x) => vec![x.to_string()],
                    AnswerValue::Text(text) => vec![text],
                    AnswerValue::List(list) => list,
                };
                Some((name, list))
            })
            .collect();
        Self { values }
    }
}

impl From<AnswerSet> for BTreeMap<FieldName, Vec<String>> {
    fn from(answers: AnswerSet) -> Self {
        answers.values
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FieldName {
        FieldName::new(s)
    }

    #[test]
    fn select_replaces_previous_choice() {
        let questionnaire = Questionnaire::observability();
        let mut form = FormState::new();
        form.select(&questionnaire, &name("scale"), Token::new("1"))
            .expect("select");
        form.select(&questionnaire, &name("scale"), Token::new("3"))
            .expect("select");

        let answers = AnswerSet::collect(&questionnaire, &form);
        assert_eq!(answers.get_all("scale"), ["3".to_string()]);
    }

    #[test]
    fn select_rejects_undeclared_option() {
        let questionnaire = Questionnaire::observability();
        let mut form = FormState::new();
        let result = form.select(&questionnaire, &name("scale"), Token::new("9"));
        assert!(matches!(result, Err(AssessmentError::UnknownOption { .. })));
    }

    #[test]
    fn mutators_check_field_kind() {
        let questionnaire = Questionnaire::observability();
        let mut form = FormState::new();
        assert!(matches!(
            form.set_text(&questionnaire, &name("scale"), "3"),
            Err(AssessmentError::FieldKindMismatch { .. })
        ));
        assert!(matches!(
            form.set_checked(&questionnaire, &name("nope"), true),
            Err(AssessmentError::UnknownField(field)) if field == "nope"
        ));
    }

    #[test]
    fn toggle_flips_membership() {
        let questionnaire = Questionnaire::observability();
        let mut form = FormState::new();
        let field = name("capabilities");
        assert!(form
            .toggle(&questionnaire, &field, Token::new("alerts"))
            .expect("toggle"));
        assert!(!form
            .toggle(&questionnaire, &field, Token::new("alerts"))
            .expect("toggle"));
        assert!(AnswerSet::collect(&questionnaire, &form)
            .get_all("capabilities")
            .is_empty());
    }

    #[test]
    fn collect_uses_presentation_order_for_tokens() {
        let questionnaire = Questionnaire::observability();
        let mut form = FormState::new();
        for token in ["integration", "dashboard", "alerts"] {
            form.toggle(&questionnaire, &name("capabilities"), Token::new(token))
                .expect("toggle");
        }

        let answers = AnswerSet::collect(&questionnaire, &form);
        assert_eq!(
            answers.get_all("capabilities"),
            ["dashboard", "alerts", "integration"].map(String::from)
        );
    }

    #[test]
    fn collect_mirrors_form_submission() {
        let questionnaire = Questionnaire::observability();
        let form = FormState::new();
        let answers = AnswerSet::collect(&questionnaire, &form);

        // Empty text fields are submitted, unset choices and boxes are not.
        assert_eq!(answers.get("name"), Some(""));
        assert_eq!(answers.get("visibility"), None);
        assert_eq!(answers.get("consent"), None);

        let mut form = FormState::new();
        form.set_checked(&questionnaire, &name("consent"), true)
            .expect("check");
        let answers = AnswerSet::collect(&questionnaire, &form);
        assert_eq!(answers.get("consent"), Some(CHECKED_VALUE));
    }

    #[test]
    fn from_pairs_and_lookup() {
        let answers = AnswerSet::from_pairs([
            ("visibility", vec!["4"]),
            ("challenges", vec!["costs", "tools"]),
        ]);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("visibility"), Some("4"));
        assert!(answers.contains("challenges", "tools"));
        assert!(!answers.contains("challenges", "expertise"));
        assert!(answers.get_all("missing").is_empty());
    }

    #[test]
    fn answers_accept_flags_and_decimals() {
        let answers: AnswerSet = serde_json::from_str(
            r#"{"consent": true, "newsletter": false, "visibility": 4.0, "scale": 2.5}"#,
        )
        .expect("answers");

        assert_eq!(answers.get("consent"), Some(CHECKED_VALUE));
        assert_eq!(answers.get("newsletter"), None);
        assert_eq!(answers.get("visibility"), Some("4"));
        assert_eq!(answers.get("scale"), Some("2.5"));
        assert_eq!(crate::compute_score(&answers), 6);
    }
}
