//! Run state threaded through the scenario
//!
//! A single owned handle replaces any global mutable state: the runner
//! creates one `TestContext`, passes it through every step, and turns it
//! into the final summary.

#![allow(dead_code)]

use crate::models::{Card, SessionCredential, TestResult, TestRunSummary, TestUser};

/// Mutable state for one scenario run
#[derive(Clone, Debug)]
pub struct TestContext {
    /// Synthetic identity used for the whole run
    pub user: TestUser,
    /// Session credential once step 2 has succeeded
    pub session: Option<SessionCredential>,
    /// First card returned by the first search, used by the
    /// card-dependent steps
    pub card: Option<Card>,
    results: Vec<TestResult>,
}

impl TestContext {
    pub fn new(user: TestUser) -> Self {
        Self {
            user,
            session: None,
            card: None,
            results: Vec::new(),
        }
    }

    /// Append one result; exactly one per executed step, in call order
    pub fn record(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Consume the context into the final run summary
    pub fn into_summary(self, base_url: impl Into<String>) -> TestRunSummary {
        TestRunSummary::new(base_url, self.results)
    }
}
