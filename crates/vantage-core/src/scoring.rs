//! # Scoring Module
//!
//! Composite maturity score and category assessment.
//!
//! ## Composite Score
//!
//! The score is the sum of eight integer contributions:
//! seven single-select ratings plus the number of selected capabilities.
//! Ratings that are absent or not integers contribute 0.
//!
//! ## Categories
//!
//! | Category | Score range |
//! |----------|-------------|
//! | Reactive | ..= 8 |
//! | Basic | 9 ..= 16 |
//! | Intermediate | 17 ..= 22 |
//! | Advanced | 23 .. |

use crate::{AnswerSet, AssessmentError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// SCORED FIELDS
// =============================================================================

/// Single-select fields whose value is an integer rating.
pub const RATING_FIELDS: [&str; 7] = [
    "visibility",
    "scale",
    "downtime",
    "toolsCount",
    "collaboration",
    "alertNoise",
    "resolution",
];

/// Multi-select field counted into the score.
pub const CAPABILITIES_FIELD: &str = "capabilities";

/// Multi-select field used only for feedback.
pub const CHALLENGES_FIELD: &str = "challenges";

// =============================================================================
// CATEGORY THRESHOLDS (inclusive upper bounds)
// =============================================================================

/// Highest score still rated Reactive.
pub const REACTIVE_MAX: i64 = 8;

/// Highest score still rated Basic.
pub const BASIC_MAX: i64 = 16;

/// Highest score still rated Intermediate.
pub const INTERMEDIATE_MAX: i64 = 22;

// =============================================================================
// SCORE
// =============================================================================

/// Compute the composite score of a submission.
#[must_use]
pub fn compute_score(answers: &AnswerSet) -> i64 {
    let ratings = RATING_FIELDS
        .iter()
        .map(|name| answers.get(name).map(coerce_rating).unwrap_or(0))
        .fold(0i64, i64::saturating_add);

    ratings.saturating_add(capability_count(answers))
}

/// Number of distinct capability tokens selected.
#[must_use]
pub fn capability_count(answers: &AnswerSet) -> i64 {
    let distinct: BTreeSet<&String> = answers.get_all(CAPABILITIES_FIELD).iter().collect();
    distinct.len() as i64
}

/// Lenient integer coercion.
///
/// Skips leading whitespace, takes an optional sign and the leading run of
/// decimal digits, and ignores the rest: `" 3 stars"` is 3, `"-2"` is -2.
/// Anything without leading digits is 0. Out-of-range values saturate.
#[must_use]
pub fn coerce_rating(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Maturity category, ordered from least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Reactive,
    Basic,
    Intermediate,
    Advanced,
}

impl Category {
    /// All categories in ascending order.
    pub const ALL: [Category; 4] = [
        Category::Reactive,
        Category::Basic,
        Category::Intermediate,
        Category::Advanced,
    ];

    /// Get the category name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Category::Reactive => "Reactive",
            Category::Basic => "Basic",
            Category::Intermediate => "Intermediate",
            Category::Advanced => "Advanced",
        }
    }

    /// The fixed description shown with the category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Category::Reactive => {
                "Your observability maturity is low. You likely react to issues after they occur. Consider adopting unified logging, metrics and proactive monitoring to gain better visibility and reduce downtime."
            }
            Category::Basic => {
                "Your observability maturity is basic. You have some monitoring in place but still struggle with root cause analysis and siloed data. Consolidating tools and investing in expertise will help you move towards proactive insights."
            }
            Category::Intermediate => {
                "Your observability maturity is intermediate. You have dashboards and alerting, but there is room to improve integration across teams and systems. Implementing unified observability practices and proactive support can elevate your maturity."
            }
            Category::Advanced => {
                "Great job! You have advanced observability capabilities with proactive monitoring and unified data. Our experts can help you optimize further, scale cost\u{2011}effectively and ensure continuous improvement."
            }
        }
    }

    /// Get the next category, if any.
    #[must_use]
    pub fn next(&self) -> Option<Category> {
        match self {
            Category::Reactive => Some(Category::Basic),
            Category::Basic => Some(Category::Intermediate),
            Category::Intermediate => Some(Category::Advanced),
            Category::Advanced => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CATEGORY ASSESSOR
// =============================================================================

/// Inclusive upper bounds of the three lower categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub reactive_max: i64,
    pub basic_max: i64,
    pub intermediate_max: i64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            reactive_max: REACTIVE_MAX,
            basic_max: BASIC_MAX,
            intermediate_max: INTERMEDIATE_MAX,
        }
    }
}

/// Category Assessor - Pure function from score to category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAssessor {
    thresholds: CategoryThresholds,
}

impl Default for CategoryAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryAssessor {
    /// Create an assessor with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            thresholds: CategoryThresholds::default(),
        }
    }

    /// Create an assessor with custom thresholds.
    ///
    /// Bounds must strictly ascend so that every category owns a
    /// non-empty range.
    pub fn with_thresholds(thresholds: CategoryThresholds) -> Result<Self, AssessmentError> {
        let CategoryThresholds {
            reactive_max,
            basic_max,
            intermediate_max,
        } = thresholds;
        if reactive_max < basic_max && basic_max < intermediate_max {
            Ok(Self { thresholds })
        } else {
            Err(AssessmentError::InvalidThresholds {
                reactive_max,
                basic_max,
                intermediate_max,
            })
        }
    }

    /// The thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> CategoryThresholds {
        self.thresholds
    }

    /// Map a score to its category.
    #[must_use]
    pub fn categorize(&self, score: i64) -> Category {
        if score <= self.thresholds.reactive_max {
            Category::Reactive
        } else if score <= self.thresholds.basic_max {
            Category::Basic
        } else if score <= self.thresholds.intermediate_max {
            Category::Intermediate
        } else {
            Category::Advanced
        }
    }

    /// Lowest score that reaches `category`, `None` for the unbounded bottom.
    #[must_use]
    pub fn lower_bound(&self, category: Category) -> Option<i64> {
        match category {
            Category::Reactive => None,
            Category::Basic => Some(self.thresholds.reactive_max.saturating_add(1)),
            Category::Intermediate => Some(self.thresholds.basic_max.saturating_add(1)),
            Category::Advanced => Some(self.thresholds.intermediate_max.saturating_add(1)),
        }
    }

    /// Points still needed to reach the next category.
    #[must_use]
    pub fn points_to_next(&self, score: i64) -> Option<i64> {
        let next = self.categorize(score).next()?;
        self.lower_bound(next)
            .map(|bound| bound.saturating_sub(score))
    }
}

/// Map a score to its category with the default thresholds.
#[must_use]
pub fn categorize(score: i64) -> (Category, &'static str) {
    let category = CategoryAssessor::new().categorize(score);
    (category, category.description())
}

// =============================================================================
// TESTS
// =============================================================================
