//! HTTP client module

mod client;

pub use client::{ApiClient, ApiRequest, ApiResponse, ProbeError};
