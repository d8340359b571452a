use std::path::Path;

use serde_json::json;

use super::common::*;
use crate::audit::compliance::{
    ComplianceChecker, ComplianceError, ComplianceResult, StaticComplianceChecker,
};

#[tokio::test]
async fn static_checker_returns_its_canned_verdict() {
    let verdict = ComplianceResult::non_compliant(failed_rules(2));
    let checker = StaticComplianceChecker::new(verdict.clone());

    let result = checker
        .check(Path::new("any.pdf"))
        .await
        .expect("static checker never fails");

    assert_eq!(result, verdict);
}

#[test]
fn failed_rules_use_validator_field_names_on_the_wire() {
    let result: ComplianceResult = serde_json::from_value(json!({
        "is_compliant": false,
        "failed_rules": [{
            "specification": "ISO 14289-1:2014",
            "clause": "7.3",
            "testNumber": "1",
            "description": "Figure tags shall include an alternative representation"
        }]
    }))
    .expect("compliance result parses");

    assert_eq!(result.failed_rules[0].test_number, "1");

    let encoded = serde_json::to_value(&result.failed_rules[0]).expect("serialize");
    assert_eq!(encoded.get("testNumber"), Some(&json!("1")));
}

#[test]
fn missing_failed_rules_default_to_empty() {
    let result: ComplianceResult =
        serde_json::from_value(json!({ "is_compliant": true })).expect("parses");

    assert_eq!(result, ComplianceResult::compliant());
}

#[test]
fn checker_errors_expose_stable_codes() {
    let cases = [
        (
            ComplianceError::BinaryNotFound {
                program: "verapdf".to_string(),
            },
            "ERR_VALIDATOR_NOT_FOUND",
        ),
        (
            ComplianceError::Timeout { seconds: 120 },
            "ERR_VALIDATOR_TIMEOUT",
        ),
        (
            ComplianceError::Execution {
                code: Some(2),
                stderr: "boom".to_string(),
            },
            "ERR_VALIDATOR_EXECUTION",
        ),
        (
            ComplianceError::MalformedReport("unexpected end".to_string()),
            "ERR_MALFORMED_REPORT",
        ),
    ];

    for (error, code) in cases {
        assert_eq!(error.code(), code, "{error}");
    }
}
