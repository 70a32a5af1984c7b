//! HTTP client for the tracker backend
//!
//! Wraps reqwest with the backend's `/api` prefix, per-request timeouts,
//! and the optional `session_token` cookie used by authenticated routes.

#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Per-operation failure taxonomy
///
/// Every probe converts into exactly one of these at its boundary; nothing
/// propagates past the runner.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    ShapeMismatch(String),

    #[error("{0}")]
    Mismatch(String),
}

impl ProbeError {
    /// Transport-level failures, as opposed to wrong-but-well-formed answers
    pub fn is_transport(&self) -> bool {
        matches!(self, ProbeError::Network(_) | ProbeError::Timeout(_))
    }
}

/// HTTP client bound to one backend base URL
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client for the given base URL with a default per-call timeout
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_prefix: "/api".to_string(),
            timeout_secs,
        })
    }

    /// Backend base URL without the API prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL for an API path
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix,
            path
        )
    }

    /// Send an API request
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ProbeError> {
        let url = self.build_url(&request.path);
        let timeout_secs = request.timeout_secs.unwrap_or(self.timeout_secs);
        debug!("Sending {} request to {}", request.method, url);

        let mut req_builder = self
            .client
            .request(request.method.clone(), &url)
            .timeout(Duration::from_secs(timeout_secs));

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(session) = &request.session {
            req_builder = req_builder.header("Cookie", format!("session_token={session}"));
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let start = std::time::Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(timeout_secs)
            } else {
                ProbeError::Network(e.to_string())
            }
        })?;

        let status = response.status();

        let set_cookies = response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::Network(format!("failed to read response body: {e}")))?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            start.elapsed().as_millis()
        );

        Ok(ApiResponse {
            status_code: status.as_u16(),
            body,
            set_cookies,
        })
    }

    /// Convenience method for GET
    pub async fn get(&self, path: &str, session: Option<&str>) -> Result<ApiResponse, ProbeError> {
        self.send(ApiRequest::get(path).maybe_session(session)).await
    }

    /// Convenience method for POST with a JSON body
    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        session: Option<&str>,
    ) -> Result<ApiResponse, ProbeError> {
        self.send(ApiRequest::post(path).json(body).maybe_session(session))
            .await
    }

    /// Convenience method for DELETE
    pub async fn delete(
        &self,
        path: &str,
        session: Option<&str>,
    ) -> Result<ApiResponse, ProbeError> {
        self.send(ApiRequest::delete(path).maybe_session(session))
            .await
    }
}

/// API request builder
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub session: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            session: None,
            timeout_secs: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn session(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    pub fn maybe_session(mut self, token: Option<&str>) -> Self {
        self.session = token.map(|t| t.to_string());
        self
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Decoded API response
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
    pub set_cookies: Vec<String>,
}

impl ApiResponse {
    /// Fail unless the response carries the expected status
    pub fn expect_status(&self, expected: u16) -> Result<(), ProbeError> {
        if self.status_code == expected {
            Ok(())
        } else {
            Err(ProbeError::UnexpectedStatus {
                status: self.status_code,
                body: self.body_snippet(),
            })
        }
    }

    /// Decode the body as JSON into the given shape
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ProbeError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ProbeError::ShapeMismatch(format!("{e} in body: {}", self.body_snippet())))
    }

    /// Whether a Set-Cookie header for the named cookie was present
    pub fn has_set_cookie(&self, name: &str) -> bool {
        let prefix = format!("{name}=");
        self.set_cookies.iter().any(|c| c.starts_with(&prefix))
    }

    /// Body truncated for log and error messages
    pub fn body_snippet(&self) -> String {
        const MAX: usize = 200;
        if self.body.len() <= MAX {
            self.body.clone()
        } else {
            let cut = self
                .body
                .char_indices()
                .take_while(|(i, _)| *i < MAX)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}…", &self.body[..cut])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status_code: status,
            body: body.to_string(),
            set_cookies: Vec::new(),
        }
    }

    #[test]
    fn test_build_url_joins_api_prefix() {
        let client = ApiClient::new("http://localhost:8080/", 10).unwrap();
        assert_eq!(
            client.build_url("/auth/me"),
            "http://localhost:8080/api/auth/me"
        );
    }

    #[test]
    fn test_request_builder() {
        let req = ApiRequest::get("/cards/search")
            .query("q", "lightning bolt")
            .timeout(15);

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.query, vec![("q".to_string(), "lightning bolt".to_string())]);
        assert_eq!(req.timeout_secs, Some(15));
        assert!(req.session.is_none());
    }

    #[test]
    fn test_request_builder_session() {
        let req = ApiRequest::post("/collection")
            .json(json!({"cardId": "abc"}))
            .session("tok");

        assert_eq!(req.session.as_deref(), Some("tok"));
        assert!(req.body.is_some());
    }

    #[test]
    fn test_expect_status() {
        assert!(response(401, "").expect_status(401).is_ok());

        let err = response(200, "ok").expect_status(401).unwrap_err();
        match err {
            ProbeError::UnexpectedStatus { status, .. } => assert_eq!(status, 200),
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_json_shape_mismatch() {
        let resp = response(200, "not json");
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ProbeError::ShapeMismatch(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_has_set_cookie() {
        let mut resp = response(200, "{}");
        resp.set_cookies
            .push("session_token=abc; Path=/; HttpOnly".to_string());

        assert!(resp.has_set_cookie("session_token"));
        assert!(!resp.has_set_cookie("other"));
    }

    #[test]
    fn test_body_snippet_truncates() {
        let resp = response(500, &"x".repeat(500));
        let snippet = resp.body_snippet();
        assert!(snippet.chars().count() <= 201);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_transport_errors() {
        assert!(ProbeError::Timeout(10).is_transport());
        assert!(ProbeError::Network("boom".into()).is_transport());
        assert!(!ProbeError::Mismatch("email mismatch".into()).is_transport());
    }
}
