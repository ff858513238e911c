//! Error types for the projects client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely tell "the
//! project does not exist" apart from "the server answered with something we
//! don't handle". Display strings of both are part of the public contract.
//! Transport failures are carried transparently so the caller sees the
//! transport's own message and source chain.

use thiserror::Error;

use crate::transport::TransportError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Detail reported for a 404 whose body carries no usable `detail` field.
pub const DEFAULT_NOT_FOUND_DETAIL: &str = "Not found.";

/// Errors returned by `ProjectsClient` and `ProjectsService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("404 - {detail}")]
    NotFound { detail: String },

    /// The server returned a status the operation does not handle.
    #[error("Unexpected status code: {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be mapped to the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status behind this error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Invalid or missing service configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid host '{0}': expected an http:// or https:// URL")]
    InvalidHost(String),

    #[error("API token must not be empty")]
    EmptyToken,
}
