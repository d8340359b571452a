use serde::{Deserialize, Serialize};

use super::compliance::FailedRule;
use super::facts::{AnalysisFacts, HeadingInfo};

/// Number of failed PDF/UA rules turned into individual recommendations.
const FAILED_RULES_DETAILED: usize = 3;

/// Remediation urgency. Ordering follows declaration: `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    Info,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub issue: String,
    pub recommendation: String,
    pub wcag_reference: String,
}

impl Recommendation {
    fn new(
        priority: Priority,
        issue: impl Into<String>,
        recommendation: impl Into<String>,
        wcag_reference: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            issue: issue.into(),
            recommendation: recommendation.into(),
            wcag_reference: wcag_reference.into(),
        }
    }
}

/// Turn document facts and failed PDF/UA rules into prioritized remediation steps.
///
/// Failed rules are read in the order the validator reported them. The result is
/// stable-sorted by priority, so items of equal priority keep the order in which
/// they were raised.
pub fn generate_recommendations(
    facts: &AnalysisFacts,
    failed_rules: &[FailedRule],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !facts.is_tagged {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Document has no structure tags",
            "Add structure tags to the PDF (for example with Adobe Acrobat Pro's autotag feature) and review the reading order.",
            "WCAG 1.3.1",
        ));
    }

    if !facts.is_title_defined {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Document title is not defined",
            "Set a descriptive title in the document properties and display it instead of the file name.",
            "WCAG 2.4.2",
        ));
    }

    if !facts.is_lang_defined {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Document language is not defined",
            "Set the primary document language in the document properties (for example 'en-US').",
            "WCAG 3.1.1",
        ));
    }

    if let Some(info) = facts.heading_info() {
        heading_recommendations(info, &mut recommendations);
    }

    let missing_alt = facts.image_info.images_without_alt;
    if missing_alt > 0 {
        recommendations.push(Recommendation::new(
            Priority::High,
            format!(
                "Missing alternative text for {missing_alt} image{}",
                plural(missing_alt as usize)
            ),
            "Add alternative text to every meaningful image and mark decorative images as artifacts.",
            "WCAG 1.1.1",
        ));
    }

    if facts.looks_scanned() {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Document appears to be scanned without a text layer",
            "Run OCR (optical character recognition) so the text can be read by assistive technology, then tag the result.",
            "WCAG 1.4.5",
        ));
    }

    for rule in failed_rules.iter().take(FAILED_RULES_DETAILED) {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            format!("PDF/UA violation: {}", rule.description),
            format!(
                "Fix the structure flagged by test {} of clause {}.",
                display_or_unknown(&rule.test_number),
                display_or_unknown(&rule.clause)
            ),
            rule_reference(rule),
        ));
    }

    let remaining = failed_rules.len().saturating_sub(FAILED_RULES_DETAILED);
    if remaining > 0 {
        recommendations.push(Recommendation::new(
            Priority::Low,
            format!("{remaining} more PDF/UA rule{} failed", plural(remaining)),
            "Run a full PDF/UA audit with a dedicated checker such as PAC or veraPDF to review every remaining violation.",
            "ISO 14289-1 (PDF/UA)",
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::new(
            Priority::Info,
            "No accessibility issues detected",
            "Congratulations! The document meets the checked accessibility criteria. Keep verifying it manually with assistive technology.",
            "WCAG 2.1 AA",
        ));
    }

    recommendations.sort_by_key(|recommendation| recommendation.priority);
    recommendations
}

fn heading_recommendations(info: &HeadingInfo, recommendations: &mut Vec<Recommendation>) {
    if info.h1_count == 0 {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Document is missing a main H1 heading",
            "Tag the document's main title as an H1 heading.",
            "WCAG 1.3.1, 2.4.6",
        ));
    } else if info.h1_count > 1 {
        recommendations.push(Recommendation::new(
            Priority::Low,
            format!("Too many H1 headings ({})", info.h1_count),
            "Keep a single H1 for the document title and demote the other top-level headings to H2.",
            "WCAG 1.3.1",
        ));
    }

    if info.has_skipped_levels {
        let issue = if info.issues.is_empty() {
            "Incorrect heading hierarchy".to_string()
        } else {
            format!("Incorrect heading hierarchy: {}", info.issues.join("; "))
        };
        recommendations.push(Recommendation::new(
            Priority::Medium,
            issue,
            "Nest headings without skipping levels (H1, then H2, then H3).",
            "WCAG 1.3.1",
        ));
    }
}

fn rule_reference(rule: &FailedRule) -> String {
    let clause = display_or_unknown(&rule.clause);
    if rule.specification.trim().is_empty() {
        format!("PDF/UA clause {clause}")
    } else {
        format!("{} clause {clause}", rule.specification)
    }
}

fn display_or_unknown(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "?"
    } else {
        trimmed
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
