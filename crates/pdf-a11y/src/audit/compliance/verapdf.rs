use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use super::{ComplianceChecker, ComplianceError, ComplianceResult, FailedRule};
use crate::config::ValidatorConfig;

const EXIT_COMPLIANT: i32 = 0;
const EXIT_NON_COMPLIANT: i32 = 1;

/// Runs veraPDF out-of-process and reads its XML validation report.
#[derive(Debug, Clone)]
pub struct VeraPdfChecker {
    config: ValidatorConfig,
}

impl VeraPdfChecker {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    fn command(&self, document: &Path) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .args(["--format", "xml", "--flavour"])
            .arg(&self.config.flavour)
            .arg(document)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ComplianceChecker for VeraPdfChecker {
    async fn check(&self, document: &Path) -> Result<ComplianceResult, ComplianceError> {
        info!(document = %document.display(), flavour = %self.config.flavour, "starting PDF/UA validation");

        let mut command = self.command(document);
        let output = match tokio::time::timeout(self.config.timeout, command.output()).await {
            Err(_) => {
                warn!(document = %document.display(), "PDF/UA validation timed out");
                return Err(ComplianceError::Timeout {
                    seconds: self.config.timeout.as_secs(),
                });
            }
            Ok(Err(err)) if err.kind() == ErrorKind::NotFound => {
                return Err(ComplianceError::BinaryNotFound {
                    program: self.config.program.clone(),
                });
            }
            Ok(Err(err)) => return Err(ComplianceError::Io(err)),
            Ok(Ok(output)) => output,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let result = interpret_exit(output.status.code(), &stdout, &stderr)?;

        info!(
            compliant = result.is_compliant,
            failed_rules = result.failed_rules.len(),
            "PDF/UA validation finished"
        );
        Ok(result)
    }
}

/// Exit code 0 is compliant, 1 is non-compliant; anything else is a failed run.
pub(crate) fn interpret_exit(
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<ComplianceResult, ComplianceError> {
    let is_compliant = match code {
        Some(EXIT_COMPLIANT) => true,
        Some(EXIT_NON_COMPLIANT) => false,
        other => {
            return Err(ComplianceError::Execution {
                code: other,
                stderr: stderr.trim().to_string(),
            })
        }
    };

    let report = if stdout.trim().is_empty() { stderr } else { stdout };
    let failed_rules = if is_compliant && report.trim().is_empty() {
        Vec::new()
    } else {
        parse_verapdf_report(report)?
    };

    Ok(ComplianceResult {
        is_compliant,
        failed_rules,
    })
}

/// Extract the failed rules, in document order, from a veraPDF XML report.
pub fn parse_verapdf_report(xml: &str) -> Result<Vec<FailedRule>, ComplianceError> {
    let document = roxmltree::Document::parse(xml)
        .map_err(|err| ComplianceError::MalformedReport(err.to_string()))?;

    let rules = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "rule")
        .filter(|node| node.attribute("status") == Some("failed"))
        .map(|node| {
            let description = node
                .children()
                .find(|child| child.is_element() && child.tag_name().name() == "description")
                .and_then(|child| child.text())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .unwrap_or("No description");

            FailedRule::new(
                node.attribute("specification").unwrap_or_default(),
                node.attribute("clause").unwrap_or_default(),
                node.attribute("testNumber").unwrap_or_default(),
                description,
            )
        })
        .collect();

    Ok(rules)
}
