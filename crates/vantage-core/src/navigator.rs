//! # Navigator Module
//!
//! The step state machine of the questionnaire.
//!
//! The navigator owns the questionnaire, the current step index, the live
//! form state and a [`ViewModel`] describing what a UI should display. UI
//! adapters translate events into calls on the navigator and apply the view
//! model; nothing here touches a concrete toolkit.
//!
//! ## Invariants
//!
//! - `current` is always in `0..step_count`
//! - exactly one step is visible: the one at `current`
//! - progress is `current / (step_count - 1)` of full width, 0 for one step
//! - retreat never validates; advance never moves past a step with a
//!   missing required field

use crate::field::FieldKind;
use crate::questionnaire::{Questionnaire, Step};
use crate::scoring::CategoryAssessor;
use crate::{AnswerSet, Assessment, AssessmentError, FieldName, FormState, Token};
use serde::{Deserialize, Serialize};

/// Full progress bar width in parts per million.
pub const FULL_WIDTH_PPM: u32 = 1_000_000;

// =============================================================================
// VIEW MODEL
// =============================================================================

/// What the UI shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    /// Visibility flag per step.
    pub visible: Vec<bool>,
    /// Progress bar width in parts per million of full width.
    pub progress_ppm: u32,
    /// Rendered result, once a submission has completed.
    pub result_markup: Option<String>,
}

impl ViewModel {
    /// Progress bar width in whole percent (rounded down).
    #[must_use]
    pub fn percent(&self) -> u32 {
        self.progress_ppm / (FULL_WIDTH_PPM / 100)
    }

    /// Index of the visible step.
    #[must_use]
    pub fn visible_step(&self) -> Option<usize> {
        self.visible.iter().position(|shown| *shown)
    }
}

/// Progress width for step `index` of `step_count`, in parts per million.
#[must_use]
pub fn progress_ppm(index: usize, step_count: usize) -> u32 {
    if step_count <= 1 {
        return 0;
    }
    let span = (step_count - 1) as u64;
    let index = (index as u64).min(span);
    (index.saturating_mul(u64::from(FULL_WIDTH_PPM)) / span) as u32
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Result of checking the required fields of the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// A required field is unmet. `offending` names the field to focus;
    /// it is `None` for consent boxes, which get no focus.
    Invalid { offending: Option<FieldName> },
}

impl Validation {
    /// Check if the step passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// Result of [`Navigator::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the step at this index.
    Moved(usize),
    /// Already on the last step.
    AtEnd,
    /// The current step failed validation; the index did not change.
    ///
    /// `offending` comes from the required-field scan, `report` from the
    /// broader invalid-field scan. They can differ: an earlier optional
    /// field with a malformed value is reported before a later missing one.
    Blocked {
        offending: Option<FieldName>,
        report: Option<FieldName>,
    },
}

/// Result of [`Navigator::finalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Scored and shown; the results region should be scrolled into view.
    Completed(Assessment),
    /// The current step failed validation; same payload as a blocked advance.
    Blocked {
        offending: Option<FieldName>,
        report: Option<FieldName>,
    },
    /// Submission only happens from the last input step.
    NotOnFinalStep { current: usize },
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// The step navigator and its explicit state.
#[derive(Debug, Clone)]
pub struct Navigator {
    questionnaire: Questionnaire,
    assessor: CategoryAssessor,
    form: FormState,
    current: usize,
    view: ViewModel,
}

impl Navigator {
    /// Create a navigator positioned on the first step.
    pub fn new(questionnaire: Questionnaire) -> Result<Self, AssessmentError> {
        questionnaire.validate()?;
        let mut navigator = Self {
            view: ViewModel {
                visible: vec![false; questionnaire.step_count()],
                progress_ppm: 0,
                result_markup: None,
            },
            questionnaire,
            assessor: CategoryAssessor::new(),
            form: FormState::new(),
            current: 0,
        };
        navigator.render();
        Ok(navigator)
    }

    /// Use a custom category assessor for submissions.
    #[must_use]
    pub fn with_assessor(mut self, assessor: CategoryAssessor) -> Self {
        self.assessor = assessor;
        self
    }

    /// Current step index.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// The current step.
    #[must_use]
    pub fn current_step(&self) -> &Step {
        // `current` is kept in range and the questionnaire is never empty.
        &self.questionnaire.steps[self.current]
    }

    /// Number of steps, results step included.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.questionnaire.step_count()
    }

    /// Check if the results step is showing.
    #[must_use]
    pub fn on_results(&self) -> bool {
        self.current == self.questionnaire.results_index()
    }

    #[must_use]
    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Select an option of an exclusive-choice field.
    pub fn select(&mut self, name: &FieldName, option: Token) -> Result<(), AssessmentError> {
        self.form.select(&self.questionnaire, name, option)
    }

    /// Flip a token of a multi-select field. Returns the new state.
    pub fn toggle(&mut self, name: &FieldName, token: Token) -> Result<bool, AssessmentError> {
        self.form.toggle(&self.questionnaire, name, token)
    }

    /// Check or uncheck a consent box.
    pub fn set_checked(&mut self, name: &FieldName, checked: bool) -> Result<(), AssessmentError> {
        self.form.set_checked(&self.questionnaire, name, checked)
    }

    /// Replace the text of a text field.
    pub fn set_text(
        &mut self,
        name: &FieldName,
        text: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        self.form.set_text(&self.questionnaire, name, text)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Sync the view model with the current index.
    pub fn render(&mut self) {
        let current = self.current;
        for (index, shown) in self.view.visible.iter_mut().enumerate() {
            *shown = index == current;
        }
        self.view.progress_ppm = progress_ppm(current, self.step_count());
    }

    /// Check the required fields of the current step, in document order.
    #[must_use]
    pub fn validate_current_step(&self) -> Validation {
        for field in &self.current_step().fields {
            if field.is_missing(&self.form.input(field)) {
                let offending = match field.kind {
                    FieldKind::BinaryConsent => None,
                    _ => Some(field.name.clone()),
                };
                return Validation::Invalid { offending };
            }
        }
        Validation::Valid
    }

    /// First field of the current step failing the broader validity check.
    #[must_use]
    pub fn first_invalid_field(&self) -> Option<FieldName> {
        self.current_step()
            .fields
            .iter()
            .find(|field| field.is_invalid(&self.form.input(field)))
            .map(|field| field.name.clone())
    }

    /// Move to the next step if the current one is valid.
    pub fn advance(&mut self) -> Advance {
        if let Validation::Invalid { offending } = self.validate_current_step() {
            return Advance::Blocked {
                offending,
                report: self.first_invalid_field(),
            };
        }
        if self.current + 1 < self.step_count() {
            self.current += 1;
            self.render();
            Advance::Moved(self.current)
        } else {
            Advance::AtEnd
        }
    }

    /// Move to the previous step. Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            self.render();
            true
        } else {
            false
        }
    }

    /// Submit from the last input step: score every answer and show results.
    pub fn finalize(&mut self) -> Submission {
        let results = self.questionnaire.results_index();
        if results == 0 || self.current + 1 != results {
            return Submission::NotOnFinalStep {
                current: self.current,
            };
        }
        if let Validation::Invalid { offending } = self.validate_current_step() {
            return Submission::Blocked {
                offending,
                report: self.first_invalid_field(),
            };
        }

        let answers = AnswerSet::collect(&self.questionnaire, &self.form);
        let assessment = Assessment::evaluate(&answers, &self.assessor);

        self.view.result_markup = Some(assessment.to_markup());
        self.current = results;
        self.render();
        Submission::Completed(assessment)
    }

    /// Answers as they would be submitted right now.
    #[must_use]
    pub fn answers(&self) -> AnswerSet {
        AnswerSet::collect(&self.questionnaire, &self.form)
    }
}

// =============================================================================
// TESTS
// =============================================================================
