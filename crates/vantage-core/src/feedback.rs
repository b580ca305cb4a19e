//! # Feedback Module
//!
//! Tailored feedback fragments derived from the selected multi-select tokens.
//!
//! - Each lookup recognizes a fixed set of tokens, in a fixed priority order
//! - Bullets follow the priority order, not the order tokens were submitted
//! - Unrecognized tokens are ignored
//! - Combo notes fire only for the explicit token pairs listed below

/// A fixed token lookup rendered as a headed bullet list.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackLookup {
    pub heading: &'static str,
    /// `(token, bullet)` in priority order.
    pub entries: &'static [(&'static str, &'static str)],
}

impl FeedbackLookup {
    /// Bullets for the recognized tokens present in `tokens`.
    #[must_use]
    pub fn bullets(&self, tokens: &[String]) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(token, _)| tokens.iter().any(|t| t == token))
            .map(|(_, bullet)| *bullet)
            .collect()
    }

    /// Render the list fragment.
    ///
    /// Empty when no tokens were selected at all. When tokens were selected
    /// but none are recognized, the heading and an empty list remain.
    #[must_use]
    pub fn render(&self, tokens: &[String]) -> String {
        if tokens.is_empty() {
            return String::new();
        }

        let mut out = format!("<strong>{}</strong><ul>", self.heading);
        for bullet in self.bullets(tokens) {
            out.push_str("<li>");
            out.push_str(bullet);
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        out
    }
}

/// Challenges the respondent reported.
pub const CHALLENGE_FEEDBACK: FeedbackLookup = FeedbackLookup {
    heading: "Challenges identified:",
    entries: &[
        (
            "expertise",
            "Lack of internal expertise: Consider investing in training or partnering with observability experts.",
        ),
        (
            "tools",
            "Too many tools / siloed data: Consolidate monitoring tools for unified visibility and easier management.",
        ),
        (
            "costs",
            "High costs of monitoring: Review your toolset and processes for cost efficiency.",
        ),
        (
            "resolution",
            "Slow incident resolution: Streamline workflows and improve root-cause analysis capabilities.",
        ),
        (
            "visibility",
            "Limited visibility: Expand monitoring coverage and break down data silos.",
        ),
    ],
};

/// Capabilities the respondent already has.
pub const CAPABILITY_FEEDBACK: FeedbackLookup = FeedbackLookup {
    heading: "Current strengths:",
    entries: &[
        (
            "dashboard",
            "Real-time dashboards: You have good visibility into your systems.",
        ),
        (
            "alerts",
            "Automated alerts: You are able to respond quickly to incidents.",
        ),
        (
            "rootcause",
            "Root cause analysis: You can identify and address underlying issues.",
        ),
        (
            "monitoring",
            "24/7 monitoring: Your systems are continuously observed for issues.",
        ),
        (
            "integration",
            "Integration across systems: You are reducing silos and improving collaboration.",
        ),
    ],
};

/// Note for challenges `expertise` + `tools`.
pub const EXPERTISE_TOOLS_NOTE: &str = "<em>Tip: Addressing both expertise and tool sprawl together can have a multiplying effect on your observability maturity.</em>";

/// Note for capabilities `alerts` + `integration`.
pub const ALERTS_INTEGRATION_NOTE: &str = "<em>Great! Automated alerts and integration across systems are a strong foundation for proactive observability.</em>";

/// Bullet list for the selected challenges.
#[must_use]
pub fn build_challenge_feedback(challenges: &[String]) -> String {
    CHALLENGE_FEEDBACK.render(challenges)
}

/// Bullet list for the selected capabilities.
#[must_use]
pub fn build_capability_feedback(capabilities: &[String]) -> String {
    CAPABILITY_FEEDBACK.render(capabilities)
}

/// Combination notes, concatenated without a separator.
#[must_use]
pub fn build_combo_feedback(challenges: &[String], capabilities: &[String]) -> String {
    let mut out = String::new();
    if has_both(challenges, "expertise", "tools") {
        out.push_str(EXPERTISE_TOOLS_NOTE);
    }
    if has_both(capabilities, "alerts", "integration") {
        out.push_str(ALERTS_INTEGRATION_NOTE);
    }
    out
}

fn has_both(tokens: &[String], first: &str, second: &str) -> bool {
    tokens.iter().any(|t| t == first) && tokens.iter().any(|t| t == second)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_tokens_no_fragment() {
        assert_eq!(build_challenge_feedback(&[]), "");
        assert_eq!(build_capability_feedback(&[]), "");
        assert_eq!(build_combo_feedback(&[], &[]), "");
    }

    #[test]
    fn bullets_follow_priority_order() {
        let fragment = build_challenge_feedback(&tokens(&["costs", "expertise"]));
        let expertise = fragment.find("Lack of internal expertise").expect("expertise");
        let costs = fragment.find("High costs of monitoring").expect("costs");
        assert!(expertise < costs);
        assert_eq!(fragment.matches("<li>").count(), 2);
        assert!(fragment.starts_with("<strong>Challenges identified:</strong><ul>"));
        assert!(fragment.ends_with("</ul>"));
    }

    #[test]
    fn unrecognized_tokens_are_ignored() {
        let fragment = build_capability_feedback(&tokens(&["telepathy"]));
        assert_eq!(fragment, "<strong>Current strengths:</strong><ul></ul>");

        let fragment = build_capability_feedback(&tokens(&["telepathy", "monitoring"]));
        assert_eq!(fragment.matches("<li>").count(), 1);
        assert!(fragment.contains("24/7 monitoring"));
    }

    #[test]
    fn every_recognized_token_has_one_bullet() {
        for lookup in [CHALLENGE_FEEDBACK, CAPABILITY_FEEDBACK] {
            let all: Vec<String> = lookup.entries.iter().map(|(t, _)| t.to_string()).collect();
            assert_eq!(all.len(), 5);
            assert_eq!(lookup.bullets(&all).len(), 5);
        }
    }

    #[test]
    fn combo_notes_fire_independently() {
        let only_first = build_combo_feedback(&tokens(&["tools", "expertise"]), &tokens(&["alerts"]));
        assert_eq!(only_first, EXPERTISE_TOOLS_NOTE);

        let only_second = build_combo_feedback(&tokens(&["tools"]), &tokens(&["integration", "alerts"]));
        assert_eq!(only_second, ALERTS_INTEGRATION_NOTE);

        let both = build_combo_feedback(
            &tokens(&["expertise", "tools"]),
            &tokens(&["alerts", "integration"]),
        );
        assert_eq!(both, format!("{EXPERTISE_TOOLS_NOTE}{ALERTS_INTEGRATION_NOTE}"));
    }
}
