//! Domain payloads exchanged with the tracker backend
//!
//! The probe owns none of this data; these types mirror the JSON shapes the
//! backend produces and consumes. Unknown card fields are preserved so a
//! card fetched from search can be echoed back verbatim as `cardData`.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Synthetic identity created once per run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: String,
}

impl TestUser {
    /// Generate a fresh test user with a random UUID identity
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            picture: "https://example.com/avatar.jpg".to_string(),
        }
    }
}

/// Opaque token proving an authenticated session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body for `POST /auth/session`: user fields plus the new token
#[derive(Clone, Debug, Serialize)]
pub struct SessionRequest {
    #[serde(flatten)]
    pub user: TestUser,
    pub session_token: String,
}

/// A card as returned by the search and detail endpoints
///
/// Only `id`, `name` and `colors` are inspected; everything else rides
/// along in `extra` and is re-serialized untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Card {
    /// Case-insensitive substring match on the card name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Whether the card carries the given color code (e.g. "R")
    pub fn has_color(&self, code: &str) -> bool {
        self.colors.iter().any(|c| c == code)
    }
}

/// Response to `POST /auth/session` and other mutating calls
#[derive(Clone, Debug, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to `GET /auth/me`
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    pub user: Option<UserInfo>,
}

/// The user object inside a `/auth/me` response
#[derive(Clone, Debug, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Response to `GET /cards/search`
///
/// `cards` is required: a 200 without it is a shape mismatch.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchResponse {
    pub cards: Vec<Card>,
}

/// Response to `GET /cards/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct CardDetailResponse {
    pub card: Option<Card>,
    #[serde(rename = "priceHistory", default)]
    pub price_history: Vec<Value>,
}

/// Body for `POST /collection`
#[derive(Clone, Debug, Serialize)]
pub struct AddCardRequest {
    #[serde(rename = "cardId")]
    pub card_id: String,
    #[serde(rename = "cardData")]
    pub card_data: Card,
}

/// Response to `GET /collection`
#[derive(Clone, Debug, Deserialize)]
pub struct CollectionResponse {
    #[serde(default)]
    pub collection: Vec<Value>,
}

/// Response to `GET /collection/check/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct MembershipResponse {
    #[serde(rename = "inCollection", default)]
    pub in_collection: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_generation() {
        let user = TestUser::generate();
        assert_eq!(user.email, "test@example.com");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_session_credentials_are_unique() {
        assert_ne!(SessionCredential::generate(), SessionCredential::generate());
    }

    #[test]
    fn test_session_request_flattens_user() {
        let user = TestUser::generate();
        let req = SessionRequest {
            user: user.clone(),
            session_token: "tok-123".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["email"], json!(user.email));
        assert_eq!(value["session_token"], json!("tok-123"));
    }

    #[test]
    fn test_card_roundtrips_unknown_fields() {
        let raw = json!({
            "id": "abc",
            "name": "Lightning Bolt",
            "colors": ["R"],
            "mana_cost": "{R}",
            "set": "lea"
        });
        let card: Card = serde_json::from_value(raw.clone()).unwrap();
        assert!(card.name_contains("lightning BOLT"));
        assert!(card.has_color("R"));
        assert!(!card.has_color("U"));

        let back = serde_json::to_value(&card).unwrap();
        assert_eq!(back["mana_cost"], json!("{R}"));
        assert_eq!(back["set"], json!("lea"));
    }

    #[test]
    fn test_search_response_requires_cards_field() {
        let ok: Result<SearchResponse, _> = serde_json::from_str(r#"{"cards": []}"#);
        assert!(ok.unwrap().cards.is_empty());

        let missing: Result<SearchResponse, _> = serde_json::from_str(r#"{"total": 0}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_detail_response_defaults() {
        let detail: CardDetailResponse =
            serde_json::from_value(json!({"card": {"id": "abc"}})).unwrap();
        assert_eq!(detail.card.unwrap().id, "abc");
        assert!(detail.price_history.is_empty());
    }

    #[test]
    fn test_ack_response_defaults() {
        let ack: AckResponse = serde_json::from_str("{}").unwrap();
        assert!(!ack.success);
        assert!(ack.message.is_none());

        let already: AckResponse =
            serde_json::from_str(r#"{"message": "Already in collection"}"#).unwrap();
        assert_eq!(already.message.as_deref(), Some("Already in collection"));
    }

    #[test]
    fn test_membership_response_defaults_false() {
        let check: MembershipResponse = serde_json::from_str("{}").unwrap();
        assert!(!check.in_collection);
    }
}
