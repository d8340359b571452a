mod verapdf;

pub use verapdf::{parse_verapdf_report, VeraPdfChecker};

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One failed PDF/UA rule as reported by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailedRule {
    pub specification: String,
    pub clause: String,
    #[serde(rename = "testNumber")]
    pub test_number: String,
    pub description: String,
}

impl FailedRule {
    pub fn new(
        specification: impl Into<String>,
        clause: impl Into<String>,
        test_number: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            specification: specification.into(),
            clause: clause.into(),
            test_number: test_number.into(),
            description: description.into(),
        }
    }
}

/// PDF/UA verdict plus the failed rules in validator order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub is_compliant: bool,
    #[serde(default)]
    pub failed_rules: Vec<FailedRule>,
}

impl ComplianceResult {
    pub fn compliant() -> Self {
        Self {
            is_compliant: true,
            failed_rules: Vec::new(),
        }
    }

    pub fn non_compliant(failed_rules: Vec<FailedRule>) -> Self {
        Self {
            is_compliant: false,
            failed_rules,
        }
    }
}

/// Capability boundary around the external PDF/UA validator.
#[async_trait]
pub trait ComplianceChecker: Send + Sync {
    async fn check(&self, document: &Path) -> Result<ComplianceResult, ComplianceError>;
}

/// Checker that always answers with the same verdict.
#[derive(Debug, Clone, Default)]
pub struct StaticComplianceChecker {
    result: ComplianceResult,
}

impl StaticComplianceChecker {
    pub fn new(result: ComplianceResult) -> Self {
        Self { result }
    }
}

#[async_trait]
impl ComplianceChecker for StaticComplianceChecker {
    async fn check(&self, _document: &Path) -> Result<ComplianceResult, ComplianceError> {
        Ok(self.result.clone())
    }
}

/// Failures raised while running or reading the external validator.
#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    #[error("validator binary '{program}' was not found")]
    BinaryNotFound { program: String },
    #[error("validator did not finish within {seconds}s")]
    Timeout { seconds: u64 },
    #[error("validator execution failed (exit code {code:?}): {stderr}")]
    Execution { code: Option<i32>, stderr: String },
    #[error("unable to parse validator report: {0}")]
    MalformedReport(String),
    #[error("failed to launch validator: {0}")]
    Io(#[from] std::io::Error),
}

impl ComplianceError {
    pub const fn code(&self) -> &'static str {
        match self {
            ComplianceError::BinaryNotFound { .. } => "ERR_VALIDATOR_NOT_FOUND",
            ComplianceError::Timeout { .. } => "ERR_VALIDATOR_TIMEOUT",
            ComplianceError::Execution { .. } => "ERR_VALIDATOR_EXECUTION",
            ComplianceError::MalformedReport(_) => "ERR_MALFORMED_REPORT",
            ComplianceError::Io(_) => "ERR_PDF_PROCESSING",
        }
    }
}
