//! Custom Test Assertions
//!
//! Provides assertion helpers for triage results that give more meaningful
//! failure messages than bare `assert_eq!`.

use domain_claims::{ClaimReport, Route};

/// Asserts the report was routed to the expected queue
///
/// # Panics
///
/// Panics with the report's reasoning if the route differs
pub fn assert_route(report: &ClaimReport, expected: Route) {
    assert_eq!(
        report.recommended_route, expected,
        "Expected route {}, got {} (reason: {})",
        expected, report.recommended_route, report.reasoning
    );
}

/// Asserts the routing reason mentions the given text
pub fn assert_reason_mentions(report: &ClaimReport, needle: &str) {
    assert!(
        report.reasoning.contains(needle),
        "Expected reason to mention {:?}, got {:?}",
        needle,
        report.reasoning
    );
}

/// Asserts the missing-field explanation lists exactly the given labels
pub fn assert_missing_fields(report: &ClaimReport, labels: &[&str]) {
    if labels.is_empty() {
        assert_eq!(report.missing_fields.len(), 1, "Expected a single all-clear line");
        assert!(
            report.missing_fields[0].starts_with(" No Missing values"),
            "Expected all-clear line, got {:?}",
            report.missing_fields
        );
        return;
    }

    assert_eq!(
        report.missing_fields.len(),
        labels.len(),
        "Expected {} missing-field lines, got {:?}",
        labels.len(),
        report.missing_fields
    );
    for (line, label) in report.missing_fields.iter().zip(labels) {
        assert!(
            line.contains(&label.to_uppercase()),
            "Expected line {:?} to name {:?}",
            line,
            label
        );
    }
}
