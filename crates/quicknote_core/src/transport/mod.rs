//! Substitutable request/response transport.
//!
//! # Responsibility
//! - Define the one seam through which the client talks to the notes API.
//! - Keep HTTP stack details out of client orchestration.
//!
//! # Invariants
//! - `send` returns `Err` only when no response was obtained; any HTTP
//!   status, including 4xx/5xx, is an `Ok(ApiResponse)`.

use crate::error::TransportError;
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use url::Url;

pub mod http;
pub mod memory;

/// HTTP verbs used against the notes API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Delete,
}

impl ApiMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for ApiMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub url: Url,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: ApiMethod::Get,
            url,
            body: None,
        }
    }

    pub fn post(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: ApiMethod::Post,
            url,
            body: Some(body),
        }
    }

    pub fn delete(url: Url) -> Self {
        Self {
            method: ApiMethod::Delete,
            url,
            body: None,
        }
    }
}

/// Raw response as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as lossy UTF-8, capped for log and error output.
    pub fn body_excerpt(&self, max_chars: usize) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let mut excerpt = text.chars().take(max_chars).collect::<String>();
        if text.chars().count() > max_chars {
            excerpt.push_str("...");
        }
        excerpt
    }
}

/// Transport contract implemented by the HTTP client and test doubles.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
