//! Scenario step implementations
//!
//! One probe type per backend operation, grouped by surface:
//!
//! - `auth` — steps 1-3 and 13 (identity checks, session lifecycle)
//! - `search` — steps 4-7 (card search, card detail)
//! - `collection` — steps 8-12 (collection CRUD and membership checks)
//!
//! Every probe catches transport and shape failures at its own boundary
//! and yields exactly one [`TestResult`]; nothing raises past the runner.

mod auth;
mod collection;
mod context;
mod search;

pub use auth::{
    AuthenticatedAccessProbe, CreateSessionProbe, LogoutProbe, UnauthenticatedAccessProbe,
};
pub use collection::{
    AddToCollectionProbe, ListCollectionProbe, MembershipCheckProbe, RemoveFromCollectionProbe,
};
pub use context::TestContext;
pub use search::{CardDetailProbe, CardSearchProbe};

use std::time::Instant;

use crate::http::ProbeError;
use crate::models::{TestCase, TestResult};

/// Convert a probe outcome into its recorded result
///
/// Transport failures map to `Error`, everything else that went wrong maps
/// to `Fail`; the four-way error taxonomy is otherwise treated uniformly.
/// Unexpected statuses keep the response body as structured details.
fn complete(case: TestCase, started: Instant, outcome: Result<String, ProbeError>) -> TestResult {
    let duration_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(message) => TestResult::pass(case, duration_ms, message),
        Err(e) if e.is_transport() => TestResult::error(case, duration_ms, e.to_string()),
        Err(ProbeError::UnexpectedStatus { status, body }) => TestResult::fail(
            case,
            duration_ms,
            format!("unexpected status {status}"),
        )
        .with_details(serde_json::json!({ "status": status, "body": body })),
        Err(e) => TestResult::fail(case, duration_ms, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestStatus;

    #[test]
    fn test_complete_maps_outcomes() {
        let start = Instant::now();

        let pass = complete(TestCase::Logout, start, Ok("done".to_string()));
        assert_eq!(pass.status, TestStatus::Pass);

        let fail = complete(
            TestCase::Logout,
            start,
            Err(ProbeError::Mismatch("email mismatch".to_string())),
        );
        assert_eq!(fail.status, TestStatus::Fail);
        assert_eq!(fail.message.as_deref(), Some("email mismatch"));

        let error = complete(
            TestCase::Logout,
            start,
            Err(ProbeError::Network("connection refused".to_string())),
        );
        assert_eq!(error.status, TestStatus::Error);
    }

    #[test]
    fn test_complete_keeps_body_on_unexpected_status() {
        let result = complete(
            TestCase::UnauthenticatedAccess,
            Instant::now(),
            Err(ProbeError::UnexpectedStatus {
                status: 200,
                body: "{\"user\":null}".to_string(),
            }),
        );

        assert_eq!(result.status, TestStatus::Fail);
        assert_eq!(result.message.as_deref(), Some("unexpected status 200"));
        let details = result.details.unwrap();
        assert_eq!(details["status"], 200);
    }
}
