// crates/mail-harness-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Tagged error model for email-service calls.
// Purpose: Separate structured API rejections from dropped connections.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`MailError::Api`] carries a structured error body returned by the service.
//! [`MailError::RemoteClosed`] is reported when the service drops the
//! connection before any response arrives, which is how oversized direct sends
//! fail. Error bodies in both the v3 envelope and the flat v2 shape are parsed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message reported when the remote endpoint closes the connection early.
pub const REMOTE_CLOSED_MESSAGE: &str =
    "Nylas API closed the connection before returning a response.";

/// Category used when an error body carries no `type` field.
const UNKNOWN_CATEGORY: &str = "unknown";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by email-service clients.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `RemoteClosed` never carries a structured payload.
#[derive(Debug, Error)]
pub enum MailError {
    /// The service returned a structured error response.
    #[error("{0}")]
    Api(ApiError),
    /// The service closed the connection before returning a response.
    #[error("{message}")]
    RemoteClosed {
        /// Human-readable description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Any other transport failure (DNS, TLS, connect).
    #[error("transport failure: {0}")]
    Transport(String),
    /// An attachment could not be opened for upload.
    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        /// Attachment path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A successful response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
    /// Client construction or request building failed.
    #[error("client configuration invalid: {0}")]
    Config(String),
}

impl MailError {
    /// Returns the structured API error when present.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }

    /// Returns true when the service dropped the connection.
    #[must_use]
    pub const fn is_remote_closed(&self) -> bool {
        matches!(self, Self::RemoteClosed { .. })
    }
}

/// Structured error returned by the service.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{category} (status {status}): {message}")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error category, e.g. `provider_error`.
    pub category: String,
    /// Human-readable message.
    pub message: String,
    /// Request identifier assigned by the service, when returned.
    pub request_id: Option<String>,
    /// Raw upstream provider payload, when returned.
    pub provider_error: Option<Value>,
}

impl ApiError {
    /// Builds an error from a non-success response body.
    ///
    /// Recognizes the v3 envelope (`{"request_id", "error": {...}}`) and the
    /// flat v2 body (`{"type", "message"}`); anything else is kept verbatim as
    /// the message.
    #[must_use]
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
            return Self {
                status,
                category: envelope.error.category.unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                message: envelope.error.message.unwrap_or_default(),
                request_id: envelope.request_id,
                provider_error: envelope.error.provider_error,
            };
        }
        if let Ok(flat) = serde_json::from_slice::<ErrorBody>(body)
            && (flat.category.is_some() || flat.message.is_some())
        {
            return Self {
                status,
                category: flat.category.unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                message: flat.message.unwrap_or_default(),
                request_id: None,
                provider_error: flat.provider_error,
            };
        }
        Self {
            status,
            category: UNKNOWN_CATEGORY.to_string(),
            message: String::from_utf8_lossy(body).into_owned(),
            request_id: None,
            provider_error: None,
        }
    }

    /// Returns the provider payload serialized as JSON text.
    #[must_use]
    pub fn provider_error_text(&self) -> Option<String> {
        self.provider_error.as_ref().map(Value::to_string)
    }
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// v3 error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    /// Request identifier.
    #[serde(default)]
    request_id: Option<String>,
    /// Nested error body.
    error: ErrorBody,
}

/// Error body shared by the v3 envelope and v2 responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Error category.
    #[serde(rename = "type", default)]
    category: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    message: Option<String>,
    /// Upstream provider payload.
    #[serde(default)]
    provider_error: Option<Value>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
