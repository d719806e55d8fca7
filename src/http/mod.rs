//! HTTP client module
//!
//! Provides the JSON client used to talk to the pictures API.
//!
//! # Features
//!
//! - **Base URL resolution**: relative paths are joined onto the configured API root
//! - **Session credentials**: the session cookie rides along on every request
//! - **Error classification**: structured API errors are decoded from non-2xx bodies

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
