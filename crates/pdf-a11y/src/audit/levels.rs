use serde::{Deserialize, Serialize};

use super::facts::AnalysisFacts;

/// Depth of an audit. Consumed by the orchestration layer only; scoring is level-agnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisLevel {
    Quick,
    #[default]
    Standard,
    Professional,
}

impl AnalysisLevel {
    pub const fn ordered() -> [AnalysisLevel; 3] {
        [Self::Quick, Self::Standard, Self::Professional]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Standard => "standard",
            Self::Professional => "professional",
        }
    }

    pub const fn config(self) -> LevelConfig {
        match self {
            Self::Quick => LevelConfig {
                level: self,
                name: "Quick scan",
                description: "Basic accessibility check (< 1s per PDF)",
                estimated_time_secs: 1,
                includes: &[
                    "Tagging check (yes/no)",
                    "Text presence",
                    "Page count",
                    "Basic accessibility estimate",
                ],
                skip_compliance: true,
                max_pages_to_scan: Some(10),
                max_file_size_mb: 50,
                failed_rules_shown: None,
            },
            Self::Standard => LevelConfig {
                level: self,
                name: "Standard analysis",
                description: "Detailed analysis with recommendations (5-10s)",
                estimated_time_secs: 10,
                includes: &[
                    "Everything in the quick scan",
                    "Heading structure analysis",
                    "Alternative text verification",
                    "Metadata checks",
                    "PDF/UA validation",
                    "Prioritized recommendations",
                ],
                skip_compliance: false,
                max_pages_to_scan: Some(50),
                max_file_size_mb: 20,
                failed_rules_shown: Some(5),
            },
            Self::Professional => LevelConfig {
                level: self,
                name: "Professional audit",
                description: "Complete WCAG / PDF-UA conformance audit (30s+)",
                estimated_time_secs: 30,
                includes: &[
                    "Everything in the standard analysis",
                    "Every page scanned",
                    "Full PDF/UA failure listing",
                    "Detailed WCAG recommendations",
                ],
                skip_compliance: false,
                max_pages_to_scan: None,
                max_file_size_mb: 10,
                failed_rules_shown: None,
            },
        }
    }
}

impl std::fmt::Display for AnalysisLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AnalysisLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "standard" => Ok(Self::Standard),
            "professional" => Ok(Self::Professional),
            other => Err(format!(
                "unknown analysis level '{other}' (expected quick, standard or professional)"
            )),
        }
    }
}

/// Per-level knobs handed to the facts extractor and the audit service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelConfig {
    pub level: AnalysisLevel,
    pub name: &'static str,
    pub description: &'static str,
    pub estimated_time_secs: u32,
    pub includes: &'static [&'static str],
    pub skip_compliance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages_to_scan: Option<u32>,
    pub max_file_size_mb: u64,
    /// `None` keeps every failed rule in the stored report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_rules_shown: Option<usize>,
}

impl LevelConfig {
    pub const fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

/// Headline numbers for a quick scan, where no PDF/UA validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSummary {
    pub accessible: bool,
    pub quick_score: u8,
}

impl QuickSummary {
    pub fn from_facts(facts: &AnalysisFacts) -> Self {
        let mut quick_score = 0;
        if facts.is_tagged {
            quick_score += 50;
        }
        if facts.contains_text {
            quick_score += 30;
        }
        if !facts.looks_scanned() {
            quick_score += 20;
        }

        Self {
            accessible: facts.is_tagged && facts.contains_text,
            quick_score,
        }
    }
}
