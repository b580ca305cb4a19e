//! # vantage-core
//!
//! The deterministic assessment engine for Vantage - THE LOGIC.
//!
//! This crate walks a respondent through a multi-step questionnaire and
//! turns the submitted answers into an observability maturity assessment:
//! a composite score, one of four categories, and tailored feedback.
//!
//! ## Components
//!
//! - `navigator` - the step state machine and its view model
//! - `field` / `form` - tagged field variants, live input, the Answer Set
//! - `scoring` / `feedback` / `report` - score, category, feedback, rendering
//!
//! ## Architectural Constraints
//!
//! - Headless: UI adapters drive the navigator and apply its view model
//! - Explicit state: every operation receives what it reads, no globals
//! - Has NO async, NO I/O, NO floats (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod feedback;
pub mod field;
pub mod form;
pub mod navigator;
pub mod questionnaire;
pub mod report;
pub mod scoring;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AssessmentError, FieldName, Token};

// =============================================================================
// RE-EXPORTS: Questionnaire & Navigation
// =============================================================================

pub use field::{Field, FieldInput, FieldKind};
pub use form::{AnswerSet, FormState};
pub use navigator::{
    Advance, FULL_WIDTH_PPM, Navigator, Submission, Validation, ViewModel, progress_ppm,
};
pub use questionnaire::{Questionnaire, Step};

// =============================================================================
// RE-EXPORTS: Scoring & Feedback
// =============================================================================

pub use feedback::{build_capability_feedback, build_challenge_feedback, build_combo_feedback};
pub use report::{Assessment, render_result};
pub use scoring::{
    BASIC_MAX, Category, CategoryAssessor, CategoryThresholds, INTERMEDIATE_MAX, REACTIVE_MAX,
    categorize, compute_score,
};
