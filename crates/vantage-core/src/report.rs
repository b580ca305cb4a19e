//! # Report Module
//!
//! The result payload of a submission and its renderings.

use crate::AnswerSet;
use crate::feedback::{
    build_capability_feedback, build_challenge_feedback, build_combo_feedback,
};
use crate::scoring::{
    CAPABILITIES_FIELD, CHALLENGES_FIELD, Category, CategoryAssessor, compute_score,
};
use serde::{Deserialize, Serialize};

/// Everything the results step shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: i64,
    pub category: Category,
    pub description: String,
    pub challenge_feedback: String,
    pub capability_feedback: String,
    pub combo_feedback: String,
}

impl Assessment {
    /// Score, categorize and derive feedback for a submission.
    #[must_use]
    pub fn evaluate(answers: &AnswerSet, assessor: &CategoryAssessor) -> Self {
        let score = compute_score(answers);
        let category = assessor.categorize(score);
        let challenges = answers.get_all(CHALLENGES_FIELD);
        let capabilities = answers.get_all(CAPABILITIES_FIELD);

        Self {
            score,
            category,
            description: category.description().to_string(),
            challenge_feedback: build_challenge_feedback(challenges),
            capability_feedback: build_capability_feedback(capabilities),
            combo_feedback: build_combo_feedback(challenges, capabilities),
        }
    }

    /// Markup for the results region.
    #[must_use]
    pub fn to_markup(&self) -> String {
        render_result(
            self.category,
            &self.description,
            &self.challenge_feedback,
            &self.capability_feedback,
            &self.combo_feedback,
        )
    }

    /// Tag-free rendering for terminals.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("{}\n\n{}\n", self.category, self.description);
        for fragment in [
            &self.challenge_feedback,
            &self.capability_feedback,
            &self.combo_feedback,
        ] {
            if !fragment.is_empty() {
                out.push('\n');
                out.push_str(&markup_to_text(fragment));
            }
        }
        out
    }
}

/// Compose the results region.
///
/// Order is fixed: category and description, then the challenge,
/// capability and combo blocks. Empty fragments produce no block.
#[must_use]
pub fn render_result(
    category: Category,
    description: &str,
    challenge_feedback: &str,
    capability_feedback: &str,
    combo_feedback: &str,
) -> String {
    let mut out = format!(
        "<span class=\"result-category\">{}</span><br>{}",
        category.name(),
        description
    );
    for (class, fragment) in [
        ("result-challenges", challenge_feedback),
        ("result-capabilities", capability_feedback),
        ("result-combo", combo_feedback),
    ] {
        if !fragment.is_empty() {
            out.push_str(&format!("<div class=\"{}\">{}</div>", class, fragment));
        }
    }
    out
}

/// Flatten feedback markup: list items become `- ` lines, other tags vanish.
fn markup_to_text(markup: &str) -> String {
    let mut out = String::new();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = &rest[open..];
            break;
        };
        match &rest[open + 1..open + close] {
            "li" => out.push_str("  - "),
            "/li" | "/strong" | "/em" => out.push('\n'),
            _ => {}
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_appear_in_fixed_order_and_only_when_non_empty() {
        let markup = render_result(Category::Basic, "desc", "", "CAP", "COMBO");
        assert_eq!(
            markup,
            "<span class=\"result-category\">Basic</span><br>desc\
             <div class=\"result-capabilities\">CAP</div>\
             <div class=\"result-combo\">COMBO</div>"
        );

        let bare = render_result(Category::Advanced, "desc", "", "", "");
        assert_eq!(bare, "<span class=\"result-category\">Advanced</span><br>desc");
    }

    #[test]
    fn evaluate_builds_all_fragments() {
        let answers = AnswerSet::from_pairs([
            ("visibility", vec!["2"]),
            ("capabilities", vec!["alerts", "integration"]),
            ("challenges", vec!["expertise", "tools"]),
        ]);
        let assessment = Assessment::evaluate(&answers, &CategoryAssessor::new());

        assert_eq!(assessment.score, 4);
        assert_eq!(assessment.category, Category::Reactive);
        assert_eq!(assessment.challenge_feedback.matches("<li>").count(), 2);
        assert_eq!(assessment.capability_feedback.matches("<li>").count(), 2);
        assert_eq!(assessment.combo_feedback.matches("<em>").count(), 2);

        let markup = assessment.to_markup();
        let challenges = markup.find("result-challenges").expect("challenges");
        let capabilities = markup.find("result-capabilities").expect("capabilities");
        let combo = markup.find("result-combo").expect("combo");
        assert!(challenges < capabilities && capabilities < combo);
    }

    #[test]
    fn plain_text_has_no_tags() {
        let answers = AnswerSet::from_pairs([("challenges", vec!["costs"])]);
        let text = Assessment::evaluate(&answers, &CategoryAssessor::new()).to_plain_text();

        assert!(text.starts_with("Reactive\n\n"));
        assert!(text.contains("Challenges identified:\n"));
        assert!(text.contains("  - High costs of monitoring"));
        assert!(!text.contains('<'));
    }
}
