//! # Assessment Tier Tests (A0-A3)
//!
//! End-to-end behavior of the engine, bottom-up.
//!
//! ## Tiers
//! - A0: Scoring
//! - A1: Feedback
//! - A2: Navigation & Validation
//! - A3: Full Walkthrough

use vantage_core::{
    AnswerSet, Assessment, Category, CategoryAssessor, FieldName, Navigator, Questionnaire,
    Submission, Token,
};

fn name(s: &str) -> FieldName {
    FieldName::new(s)
}

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// TIER A0: SCORING
// =============================================================================

mod a0_scoring {
    use super::*;
    use vantage_core::{categorize, compute_score};

    /// A0.1: No answers score zero.
    #[test]
    fn empty_answers_score_zero() {
        assert_eq!(compute_score(&AnswerSet::new()), 0);
    }

    /// A0.2: All eight contributions are summed.
    #[test]
    fn reference_submission_is_intermediate() {
        let answers = AnswerSet::from_pairs([
            ("visibility", vec!["5"]),
            ("capabilities", vec!["dashboard", "alerts"]),
            ("scale", vec!["3"]),
            ("downtime", vec!["2"]),
            ("toolsCount", vec!["1"]),
            ("collaboration", vec!["2"]),
            ("alertNoise", vec!["1"]),
            ("resolution", vec!["1"]),
        ]);
        let score = compute_score(&answers);
        assert_eq!(score, 17);
        assert_eq!(categorize(score).0, Category::Intermediate);
    }

    /// A0.3: The documented boundary scores.
    #[test]
    fn boundary_scores() {
        let cases = [
            (8, Category::Reactive),
            (9, Category::Basic),
            (16, Category::Basic),
            (17, Category::Intermediate),
            (22, Category::Intermediate),
            (23, Category::Advanced),
        ];
        for (score, expected) in cases {
            assert_eq!(categorize(score).0, expected, "score {score}");
        }
    }

    /// A0.4: Answers parse from a JSON answers file.
    #[test]
    fn answers_from_json() {
        let json = r#"{"visibility": 5, "scale": "3", "capabilities": ["alerts"]}"#;
        let answers: AnswerSet = serde_json::from_str(json).expect("parse");
        assert_eq!(compute_score(&answers), 9);
    }
}

// =============================================================================
// TIER A1: FEEDBACK
// =============================================================================

mod a1_feedback {
    use super::*;
    use vantage_core::feedback::{ALERTS_INTEGRATION_NOTE, EXPERTISE_TOOLS_NOTE};
    use vantage_core::{build_challenge_feedback, build_combo_feedback};

    /// A1.1: Challenge bullets follow priority order, not input order.
    #[test]
    fn challenge_bullets_in_priority_order() {
        let fragment = build_challenge_feedback(&tokens(&["costs", "expertise"]));
        assert_eq!(
            fragment,
            "<strong>Challenges identified:</strong><ul>\
             <li>Lack of internal expertise: Consider investing in training or partnering with observability experts.</li>\
             <li>High costs of monitoring: Review your toolset and processes for cost efficiency.</li>\
             </ul>"
        );
    }

    /// A1.2: Only the matching combo note is emitted.
    #[test]
    fn only_expertise_tools_combo() {
        let combo = build_combo_feedback(&tokens(&["expertise", "tools"]), &tokens(&["dashboard"]));
        assert!(combo.contains(EXPERTISE_TOOLS_NOTE));
        assert!(!combo.contains(ALERTS_INTEGRATION_NOTE));
    }
}

// =============================================================================
// TIER A2: NAVIGATION & VALIDATION
// =============================================================================

mod a2_navigation {
    use super::*;
    use vantage_core::{Advance, Field, FieldKind, Step};

    /// A2.1: An unfilled required text field blocks and is identified.
    #[test]
    fn unfilled_required_text_blocks_advance() {
        let questionnaire = Questionnaire::new(
            "contact",
            vec![
                Step::new(
                    "who",
                    vec![Field::new("email", FieldKind::FreeText { numeric: false }).required()],
                ),
                Step::new("more", Vec::new()),
                Step::results("done"),
            ],
        )
        .expect("valid");
        let mut navigator = Navigator::new(questionnaire).expect("nav");

        let outcome = navigator.advance();
        assert_eq!(
            outcome,
            Advance::Blocked {
                offending: Some(name("email")),
                report: Some(name("email")),
            }
        );
        assert_eq!(navigator.current(), 0);
    }

    /// A2.2: Going back keeps entered answers.
    #[test]
    fn retreat_keeps_answers() {
        let mut navigator = Navigator::new(Questionnaire::observability()).expect("nav");
        navigator
            .select(&name("visibility"), Token::new("3"))
            .expect("select");
        assert_eq!(navigator.advance(), Advance::Moved(1));
        assert!(navigator.retreat());
        assert_eq!(navigator.answers().get("visibility"), Some("3"));
        assert_eq!(navigator.advance(), Advance::Moved(1));
    }
}

// =============================================================================
// TIER A3: FULL WALKTHROUGH
// =============================================================================

mod a3_walkthrough {
    use super::*;
    use vantage_core::Advance;

    fn pick(navigator: &mut Navigator, field: &str, option: &str) {
        navigator
            .select(&name(field), Token::new(option))
            .expect("select");
    }

    fn toggle(navigator: &mut Navigator, field: &str, option: &str) {
        navigator
            .toggle(&name(field), Token::new(option))
            .expect("toggle");
    }

    fn next(navigator: &mut Navigator) {
        assert!(matches!(navigator.advance(), Advance::Moved(_)));
    }

    /// A3.1: Walking the built-in questionnaire produces the expected result.
    #[test]
    fn builtin_walkthrough() {
        let mut navigator = Navigator::new(Questionnaire::observability()).expect("nav");

        pick(&mut navigator, "visibility", "5");
        next(&mut navigator);
        toggle(&mut navigator, "capabilities", "integration");
        toggle(&mut navigator, "capabilities", "alerts");
        next(&mut navigator);
        pick(&mut navigator, "scale", "3");
        pick(&mut navigator, "downtime", "2");
        next(&mut navigator);
        pick(&mut navigator, "toolsCount", "3");
        pick(&mut navigator, "collaboration", "3");
        next(&mut navigator);
        pick(&mut navigator, "alertNoise", "3");
        pick(&mut navigator, "resolution", "3");
        next(&mut navigator);
        toggle(&mut navigator, "challenges", "costs");
        next(&mut navigator);

        navigator.set_text(&name("name"), "Ada").expect("text");
        navigator
            .set_text(&name("email"), "ada@example.com")
            .expect("text");

        // Consent still missing: blocked, nothing scored.
        assert!(matches!(
            navigator.finalize(),
            Submission::Blocked { offending: None, .. }
        ));
        assert!(!navigator.on_results());

        navigator
            .set_checked(&name("consent"), true)
            .expect("check");
        let Submission::Completed(assessment) = navigator.finalize() else {
            unreachable!("submission should complete");
        };

        // 5 + 2 capabilities + 3 + 2 + 3 + 3 + 3 + 3
        assert_eq!(assessment.score, 24);
        assert_eq!(assessment.category, Category::Advanced);
        assert!(assessment.challenge_feedback.contains("High costs of monitoring"));
        assert!(assessment.capability_feedback.contains("Automated alerts"));
        assert!(assessment.capability_feedback.contains("Integration across systems"));
        assert!(assessment.combo_feedback.starts_with("<em>Great!"));

        assert!(navigator.on_results());
        assert_eq!(navigator.view().percent(), 100);
        let markup = navigator.view().result_markup.as_deref().expect("markup");
        assert!(markup.starts_with("<span class=\"result-category\">Advanced</span><br>Great job!"));
    }

    /// A3.2: Custom thresholds flow through submission.
    #[test]
    fn custom_assessor_applies() {
        let answers = AnswerSet::from_pairs([("visibility", vec!["5"])]);
        let strict = CategoryAssessor::with_thresholds(vantage_core::CategoryThresholds {
            reactive_max: 2,
            basic_max: 4,
            intermediate_max: 6,
        })
        .expect("thresholds");

        assert_eq!(
            Assessment::evaluate(&answers, &strict).category,
            Category::Intermediate
        );
        assert_eq!(
            Assessment::evaluate(&answers, &CategoryAssessor::new()).category,
            Category::Reactive
        );
    }
}
