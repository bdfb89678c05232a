//! Typed request layer for the aerodesk charts and auditing backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `Api` pairs that pure core
//! with a `Transport` so each operation is a single async call.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Absence (`null` or empty body) is `Ok(None)`; faults are `Err(ApiError)`
//!   and are never retried or translated here.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::Api;
pub use client::{email_code_accepted, ApiClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseKind, BINARY_TIMEOUT};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AirportChartIndex, AuditLog, BoundingBox, BoundingBoxes, ChartsIndex, EmailCodeRequest,
    EmailCodeResponse, LatLng, PageData, Pixel, ProxyPayload,
};
