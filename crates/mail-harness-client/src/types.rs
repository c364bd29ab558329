// crates/mail-harness-client/src/types.rs
// ============================================================================
// Module: Request and Response Types
// Description: Builders for outgoing drafts/messages and decoded responses.
// Purpose: Describe the subset of the v3 object model the scenarios use.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Requests are built with consuming setter methods. Attachments are kept out
//! of the serialized JSON; the transport streams them as multipart file parts
//! alongside a `message` part holding the serialized request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::MailError;

// ============================================================================
// SECTION: Addresses
// ============================================================================

/// Email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailName {
    /// Address, e.g. `user@example.com`.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailName {
    /// Creates an address with a display name.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// Creates an address without a display name.
    #[must_use]
    pub fn address(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

// ============================================================================
// SECTION: Attachments
// ============================================================================

/// File-backed attachment descriptor.
///
/// # Invariants
/// - `size` reflects the file length when the descriptor was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Path the attachment is streamed from.
    pub path: PathBuf,
    /// File name presented to recipients.
    pub filename: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Length in bytes.
    pub size: u64,
}

impl Attachment {
    /// Describes the file at `path`, deriving the file name and content type.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Attachment`] when the file metadata cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MailError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| MailError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map_or_else(|| "attachment".to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self {
            path: path.to_path_buf(),
            content_type: guess_content_type(path).to_string(),
            filename,
            size: metadata.len(),
        })
    }
}

/// Maps common file extensions to MIME types.
fn guess_content_type(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("txt") => "text/plain",
        Some("html" | "htm") => "text/html",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Request body for creating a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDraftRequest {
    /// Primary recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<EmailName>,
    /// Carbon-copy recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailName>,
    /// Blind carbon-copy recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailName>,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// File attachments, sent as multipart parts.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl CreateDraftRequest {
    /// Creates an empty draft request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary recipients.
    #[must_use]
    pub fn to(mut self, to: Vec<EmailName>) -> Self {
        self.to = to;
        self
    }

    /// Sets the carbon-copy recipients.
    #[must_use]
    pub fn cc(mut self, cc: Vec<EmailName>) -> Self {
        self.cc = cc;
        self
    }

    /// Sets the blind carbon-copy recipients.
    #[must_use]
    pub fn bcc(mut self, bcc: Vec<EmailName>) -> Self {
        self.bcc = bcc;
        self
    }

    /// Sets the subject line.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the attachments.
    #[must_use]
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Request body for sending a message directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessageRequest {
    /// Primary recipients.
    pub to: Vec<EmailName>,
    /// Carbon-copy recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailName>,
    /// Blind carbon-copy recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailName>,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// File attachments, sent as multipart parts.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

impl SendMessageRequest {
    /// Creates a send request for the given recipients.
    #[must_use]
    pub const fn new(to: Vec<EmailName>) -> Self {
        Self {
            to,
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: None,
            body: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the carbon-copy recipients.
    #[must_use]
    pub fn cc(mut self, cc: Vec<EmailName>) -> Self {
        self.cc = cc;
        self
    }

    /// Sets the blind carbon-copy recipients.
    #[must_use]
    pub fn bcc(mut self, bcc: Vec<EmailName>) -> Self {
        self.bcc = bcc;
        self
    }

    /// Sets the subject line.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the attachments.
    #[must_use]
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Success envelope wrapping a returned object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse<T> {
    /// Request identifier assigned by the service.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Returned object.
    pub data: T,
}

/// Draft as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Draft {
    /// Draft identifier.
    pub id: String,
    /// Grant the draft belongs to.
    pub grant_id: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Object kind, `draft`.
    pub object: Option<String>,
}

/// Message as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Grant the message belongs to.
    pub grant_id: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Object kind, `message`.
    pub object: Option<String>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
