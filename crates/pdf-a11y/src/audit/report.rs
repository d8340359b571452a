use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::{ComplianceResult, FailedRule};
use super::facts::AnalysisFacts;
use super::levels::{AnalysisLevel, QuickSummary};
use super::recommendations::{Priority, Recommendation};
use super::scoring::ScoreReport;

/// Identifier wrapper for stored audit reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Passthrough details about the analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub filename: String,
    pub analysis_date: DateTime<Utc>,
    pub file_size: u64,
    pub analysis_level: AnalysisLevel,
}

/// PDF/UA verdict as stored in the report; `failed_rules` may be truncated per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfUaValidation {
    pub is_compliant: bool,
    pub failed_rules_count: usize,
    pub failed_rules: Vec<FailedRule>,
}

impl PdfUaValidation {
    /// Keep the full count but at most `shown` rules; `None` keeps every rule.
    pub fn from_result(result: ComplianceResult, shown: Option<usize>) -> Self {
        let failed_rules_count = result.failed_rules.len();
        let mut failed_rules = result.failed_rules;
        if let Some(limit) = shown {
            failed_rules.truncate(limit);
        }

        Self {
            is_compliant: result.is_compliant,
            failed_rules_count,
            failed_rules,
        }
    }
}

/// Final report assembled by the audit service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub report_id: ReportId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub metadata: ReportMetadata,
    pub facts: AnalysisFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_ua_validation: Option<PdfUaValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_score: Option<ScoreReport>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_summary: Option<QuickSummary>,
}

impl AuditReport {
    pub fn recommendations_with(&self, priority: Priority) -> usize {
        self.recommendations
            .iter()
            .filter(|recommendation| recommendation.priority == priority)
            .count()
    }

    pub fn status_view(&self) -> AuditStatusView {
        AuditStatusView {
            report_id: self.report_id.clone(),
            filename: self.metadata.filename.clone(),
            analysis_level: self.metadata.analysis_level,
            percentage: self
                .accessibility_score
                .as_ref()
                .map(|score| score.percentage),
            accessibility_level: self
                .accessibility_score
                .as_ref()
                .map(ScoreReport::level_label),
            quick_score: self.quick_summary.map(|summary| summary.quick_score),
            recommendations: RecommendationCounts {
                high: self.recommendations_with(Priority::High),
                medium: self.recommendations_with(Priority::Medium),
                low: self.recommendations_with(Priority::Low),
                info: self.recommendations_with(Priority::Info),
            },
        }
    }
}

/// Condensed view used by listings and the CLI summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditStatusView {
    pub report_id: ReportId,
    pub filename: String,
    pub analysis_level: AnalysisLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_score: Option<u8>,
    pub recommendations: RecommendationCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl RecommendationCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low + self.info
    }
}
