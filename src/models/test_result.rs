//! Test result models for the backend probe
//!
//! Defines the scenario steps, per-step results, and the run summary.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 13 scenario steps, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    // Auth steps (1-3)
    UnauthenticatedAccess,
    CreateSession,
    AuthenticatedAccess,

    // Search steps (4-7)
    SearchLightningBolt,
    SearchBlackLotus,
    SearchColorRed,
    CardDetails,

    // Collection steps (8-12)
    AddToCollection,
    ListCollection,
    MembershipCheck,
    RemoveFromCollection,
    RemovalConfirmation,

    // Auth step (13)
    Logout,
}

impl TestCase {
    /// Get step number (1-13)
    pub fn number(&self) -> u8 {
        match self {
            TestCase::UnauthenticatedAccess => 1,
            TestCase::CreateSession => 2,
            TestCase::AuthenticatedAccess => 3,
            TestCase::SearchLightningBolt => 4,
            TestCase::SearchBlackLotus => 5,
            TestCase::SearchColorRed => 6,
            TestCase::CardDetails => 7,
            TestCase::AddToCollection => 8,
            TestCase::ListCollection => 9,
            TestCase::MembershipCheck => 10,
            TestCase::RemoveFromCollection => 11,
            TestCase::RemovalConfirmation => 12,
            TestCase::Logout => 13,
        }
    }

    /// Get step name
    pub fn name(&self) -> &'static str {
        match self {
            TestCase::UnauthenticatedAccess => "Unauthenticated Access",
            TestCase::CreateSession => "Create Session",
            TestCase::AuthenticatedAccess => "Authenticated Access",
            TestCase::SearchLightningBolt => "Search: lightning bolt",
            TestCase::SearchBlackLotus => "Search: black lotus",
            TestCase::SearchColorRed => "Search: color:red",
            TestCase::CardDetails => "Card Details",
            TestCase::AddToCollection => "Add to Collection",
            TestCase::ListCollection => "List Collection",
            TestCase::MembershipCheck => "Membership Check",
            TestCase::RemoveFromCollection => "Remove from Collection",
            TestCase::RemovalConfirmation => "Removal Confirmation",
            TestCase::Logout => "Logout",
        }
    }

    /// Get step category
    pub fn category(&self) -> &'static str {
        match self {
            TestCase::UnauthenticatedAccess
            | TestCase::CreateSession
            | TestCase::AuthenticatedAccess
            | TestCase::Logout => "Auth",
            TestCase::SearchLightningBolt
            | TestCase::SearchBlackLotus
            | TestCase::SearchColorRed
            | TestCase::CardDetails => "Search",
            _ => "Collection",
        }
    }

    /// All steps in scenario order
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::UnauthenticatedAccess,
            TestCase::CreateSession,
            TestCase::AuthenticatedAccess,
            TestCase::SearchLightningBolt,
            TestCase::SearchBlackLotus,
            TestCase::SearchColorRed,
            TestCase::CardDetails,
            TestCase::AddToCollection,
            TestCase::ListCollection,
            TestCase::MembershipCheck,
            TestCase::RemoveFromCollection,
            TestCase::RemovalConfirmation,
            TestCase::Logout,
        ]
    }

    /// Parse from step number
    pub fn from_number(n: u8) -> Option<TestCase> {
        match n {
            1 => Some(TestCase::UnauthenticatedAccess),
            2 => Some(TestCase::CreateSession),
            3 => Some(TestCase::AuthenticatedAccess),
            4 => Some(TestCase::SearchLightningBolt),
            5 => Some(TestCase::SearchBlackLotus),
            6 => Some(TestCase::SearchColorRed),
            7 => Some(TestCase::CardDetails),
            8 => Some(TestCase::AddToCollection),
            9 => Some(TestCase::ListCollection),
            10 => Some(TestCase::MembershipCheck),
            11 => Some(TestCase::RemoveFromCollection),
            12 => Some(TestCase::RemovalConfirmation),
            13 => Some(TestCase::Logout),
            _ => None,
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.name())
    }
}

/// Step execution status
///
/// `Fail` covers unexpected statuses, bad payload shapes, and business-rule
/// mismatches; `Error` covers transport-level failures. Both count against
/// the exit code. Steps whose prerequisite is missing are not executed and
/// record nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single executed step, append-only
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case: TestCase,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl TestResult {
    pub fn pass(test_case: TestCase, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Pass,
            duration_ms,
            timestamp: Utc::now(),
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn fail(test_case: TestCase, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Fail,
            duration_ms,
            timestamp: Utc::now(),
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn error(test_case: TestCase, duration_ms: u64, error: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Error,
            duration_ms,
            timestamp: Utc::now(),
            message: Some(error.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.test_case,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of a full scenario run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestRunSummary {
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestRunSummary {
    pub fn new(base_url: impl Into<String>, results: Vec<TestResult>) -> Self {
        let total = results.len();
        let passed = results
            .iter()
            .filter(|r| r.status == TestStatus::Pass)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == TestStatus::Fail)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == TestStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            base_url: base_url.into(),
            total,
            passed,
            failed,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Results that did not pass, in execution order
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results
            .iter()
            .filter(|r| !r.status.is_success())
            .collect()
    }
}

impl fmt::Display for TestRunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Probe run against {}", self.base_url)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Error: {}",
            self.total, self.passed, self.failed, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_numbers() {
        assert_eq!(TestCase::UnauthenticatedAccess.number(), 1);
        assert_eq!(TestCase::Logout.number(), 13);
    }

    #[test]
    fn test_case_from_number() {
        assert_eq!(
            TestCase::from_number(1),
            Some(TestCase::UnauthenticatedAccess)
        );
        assert_eq!(
            TestCase::from_number(12),
            Some(TestCase::RemovalConfirmation)
        );
        assert_eq!(TestCase::from_number(14), None);
    }

    #[test]
    fn test_all_cases_in_order() {
        let all = TestCase::all();
        assert_eq!(all.len(), 13);
        for (i, case) in all.iter().enumerate() {
            assert_eq!(case.number() as usize, i + 1);
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(TestCase::Logout.category(), "Auth");
        assert_eq!(TestCase::CardDetails.category(), "Search");
        assert_eq!(TestCase::MembershipCheck.category(), "Collection");
    }

    #[test]
    fn test_result_creation() {
        let result = TestResult::pass(TestCase::CreateSession, 42, "session created");
        assert!(result.status.is_success());
        assert_eq!(result.duration_ms, 42);
        assert_eq!(result.message.as_deref(), Some("session created"));
    }

    #[test]
    fn test_run_summary() {
        let results = vec![
            TestResult::pass(TestCase::UnauthenticatedAccess, 100, "401 as expected"),
            TestResult::fail(TestCase::SearchBlackLotus, 50, "no cards returned"),
            TestResult::error(TestCase::Logout, 0, "connection refused"),
        ];

        let summary = TestRunSummary::new("http://localhost:8080", results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, 1);
        assert!(!summary.is_all_passed());
        assert_eq!(summary.failures().len(), 2);
    }

    #[test]
    fn test_pass_rate_empty() {
        let summary = TestRunSummary::new("http://localhost:8080", Vec::new());
        assert_eq!(summary.pass_rate(), 0.0);
    }
}
