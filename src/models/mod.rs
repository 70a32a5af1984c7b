//! Data models for the backend probe

mod card;
mod test_result;

pub use card::{
    AckResponse, AddCardRequest, Card, CardDetailResponse, CollectionResponse, MembershipResponse,
    MeResponse, SearchResponse, SessionCredential, SessionRequest, TestUser, UserInfo,
};
pub use test_result::{TestCase, TestResult, TestRunSummary, TestStatus};
