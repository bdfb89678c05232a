//! Error types for the aerodesk API client.
//!
//! # Design
//! Ordinary absence (a `null` or empty body) is not an error; it surfaces as
//! `None` from the parse methods. Everything here is a fault that callers see
//! unchanged: `NotFound` gets a dedicated variant, other non-2xx responses
//! land in `HttpError` with the raw status and body, and connection or
//! timeout failures from the transport land in `Transport`.

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and `Api` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}
