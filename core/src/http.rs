//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `ApiClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network; a `Transport` executes the actual I/O.
//!
//! A request also carries how its response must be decoded (`ResponseKind`)
//! and an optional timeout override, since the chart proxy fetches binary
//! images that take longer than ordinary JSON calls.

use std::time::Duration;

/// Timeout applied to proxied requests that download binary payloads.
pub const BINARY_TIMEOUT: Duration = Duration::from_millis(30_000);

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// How the transport should treat the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Json,
    Binary,
}

/// An HTTP request described as plain data.
///
/// `path` is fully qualified and already contains its query string.
/// A `timeout` of `None` leaves the transport's default in effect.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub response_kind: ResponseKind,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub(crate) fn get(path: String) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
            response_kind: ResponseKind::Json,
            timeout: None,
        }
    }

    pub(crate) fn post_json(path: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            response_kind: ResponseKind::Json,
            timeout: None,
        }
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as raw bytes so binary chart images survive untouched.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Convenience constructor for a response carrying a textual body.
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the body is empty or only whitespace.
    pub fn is_empty_body(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
