// crates/mail-harness-client/src/lib.rs
// ============================================================================
// Module: Mail Harness Client
// Description: Thin email-service client and failure classification.
// Purpose: Drive draft and send calls and classify oversized-attachment errors.
// Dependencies: reqwest, hyper, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! This crate covers the two call shapes the attachment scenarios exercise,
//! "create draft" and "send message", against the v3 API, plus draft sending
//! against the v2 API. Errors are reported as a tagged [`MailError`] rather
//! than a type hierarchy, and [`FailureMatchers`] classifies them into the two
//! oversized-attachment signals.
//! Invariants:
//! - Structured API errors and dropped connections are distinct variants.
//! - Attachments are streamed from disk; request bodies are never buffered whole.
//! - Detection substrings are configuration, not constants baked into callers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod classify;
pub mod error;
pub mod service;
pub mod transport;
pub mod types;
pub mod v2;
pub mod v3;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classify::AttachmentTooLarge;
pub use classify::FailureMatchers;
pub use classify::SignalKind;
pub use error::ApiError;
pub use error::MailError;
pub use error::REMOTE_CLOSED_MESSAGE;
pub use service::CallShape;
pub use service::MailService;
pub use service::OutgoingMessage;
pub use transport::HttpSettings;
pub use types::ApiResponse;
pub use types::Attachment;
pub use types::CreateDraftRequest;
pub use types::Draft;
pub use types::EmailName;
pub use types::Message;
pub use types::SendMessageRequest;
pub use v2::NylasV2Client;
pub use v3::NylasClient;
pub use v3::NylasClientBuilder;
