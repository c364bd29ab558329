// crates/mail-harness-client/src/classify.rs
// ============================================================================
// Module: Oversized-Attachment Classification
// Description: Maps client errors onto the two too-large failure signals.
// Purpose: Assert the provider's draft/send asymmetry with tunable matchers.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! An oversized attachment fails differently depending on the call shape: a
//! draft is rejected with a structured provider error, while a direct send is
//! cut off by the service closing the connection. [`FailureMatchers`] decides
//! whether an error is one of those signals using configurable substrings,
//! since the wording varies by provider and API version.
//! Invariants:
//! - Matching is case-insensitive; empty matcher strings never match.
//! - Only [`MailError::Api`] can yield a provider rejection.
//! - Only connection-level errors can yield a transport close.
//! - The provider payload is searched before the error message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::error::MailError;
use crate::service::CallShape;

// ============================================================================
// SECTION: Signals
// ============================================================================

/// Kind of oversized-attachment failure, without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Structured rejection carrying a size-exceeded indicator.
    ProviderRejection,
    /// Connection closed by the service before any response.
    TransportClosed,
}

/// A classified oversized-attachment failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentTooLarge {
    /// The service rejected the request with a structured error.
    ProviderRejection {
        /// Call shape that triggered the failure.
        call: CallShape,
        /// Error category reported by the service.
        category: String,
        /// Text in which the size-exceeded indicator was found.
        detail: String,
    },
    /// The service closed the connection without a structured error.
    TransportClosed {
        /// Call shape that triggered the failure.
        call: CallShape,
        /// Error message that carried the connection-closed indicator.
        message: String,
    },
}

impl AttachmentTooLarge {
    /// Returns the signal kind.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::ProviderRejection { .. } => SignalKind::ProviderRejection,
            Self::TransportClosed { .. } => SignalKind::TransportClosed,
        }
    }

    /// Returns the call shape that triggered the failure.
    #[must_use]
    pub const fn call(&self) -> CallShape {
        match self {
            Self::ProviderRejection { call, .. } | Self::TransportClosed { call, .. } => *call,
        }
    }
}

impl CallShape {
    /// Returns the signal the service is expected to produce for an oversized
    /// attachment submitted through this call shape.
    #[must_use]
    pub const fn expected_signal(self) -> SignalKind {
        match self {
            Self::Draft => SignalKind::ProviderRejection,
            Self::Send => SignalKind::TransportClosed,
        }
    }
}

// ============================================================================
// SECTION: Matchers
// ============================================================================

/// Substring matchers used to recognize oversized-attachment failures.
///
/// # Invariants
/// - An empty `rejection_categories` list accepts any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FailureMatchers {
    /// Error categories accepted for a provider rejection.
    pub rejection_categories: Vec<String>,
    /// Indicators that a size limit was exceeded.
    pub size_exceeded: Vec<String>,
    /// Indicators that the connection was closed by the service.
    pub connection_closed: Vec<String>,
}

impl Default for FailureMatchers {
    fn default() -> Self {
        Self {
            rejection_categories: Vec::new(),
            size_exceeded: vec!["too large".to_string(), "max size".to_string()],
            connection_closed: vec![
                "closed the connection".to_string(),
                "connection closed".to_string(),
            ],
        }
    }
}

impl FailureMatchers {
    /// Restricts provider rejections to the given categories.
    #[must_use]
    pub fn with_rejection_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rejection_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Classifies `err` raised by a `call` submission.
    ///
    /// Returns `None` when the error is not a recognized oversized-attachment
    /// failure.
    #[must_use]
    pub fn classify(&self, call: CallShape, err: &MailError) -> Option<AttachmentTooLarge> {
        let signal = match err {
            MailError::Api(api) => {
                if !self.category_allowed(&api.category) {
                    return None;
                }
                let payload = api.provider_error_text();
                [payload.as_deref(), Some(api.message.as_str())]
                    .into_iter()
                    .flatten()
                    .find(|text| contains_any(text, &self.size_exceeded))
                    .map(|text| AttachmentTooLarge::ProviderRejection {
                        call,
                        category: api.category.clone(),
                        detail: text.to_string(),
                    })
            }
            MailError::RemoteClosed {
                message,
            }
            | MailError::Transport(message) => contains_any(message, &self.connection_closed)
                .then(|| AttachmentTooLarge::TransportClosed {
                    call,
                    message: message.clone(),
                }),
            _ => None,
        };
        debug!(%call, error = %err, matched = signal.is_some(), "classified failure");
        signal
    }

    /// Returns true when `category` is accepted for a provider rejection.
    fn category_allowed(&self, category: &str) -> bool {
        self.rejection_categories.is_empty()
            || self.rejection_categories.iter().any(|allowed| allowed.eq_ignore_ascii_case(category))
    }
}

/// Case-insensitive search for any non-empty needle.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .filter(|needle| !needle.is_empty())
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
