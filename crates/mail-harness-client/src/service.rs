// crates/mail-harness-client/src/service.rs
// ============================================================================
// Module: Mail Service Interface
// Description: Call-shape abstraction over the email-service client.
// Purpose: Let scenarios drive either call shape through one seam.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`MailService`] names the two call shapes the scenarios exercise. The same
//! [`OutgoingMessage`] can be submitted through either shape with
//! [`MailService::submit`], so draft and send scenarios share their setup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::MailError;
use crate::types::Attachment;
use crate::types::CreateDraftRequest;
use crate::types::Draft;
use crate::types::EmailName;
use crate::types::Message;
use crate::types::SendMessageRequest;

// ============================================================================
// SECTION: Call Shapes
// ============================================================================

/// Which service call an outgoing message is submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallShape {
    /// Create a provider-stored draft.
    Draft,
    /// Send the message directly.
    Send,
}

impl CallShape {
    /// Returns a stable label for the call shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Send => "send",
        }
    }
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Outgoing Message
// ============================================================================

/// Message content independent of the call shape used to submit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Primary recipients.
    pub to: Vec<EmailName>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// File attachments.
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    /// Builds a draft request carrying this content.
    #[must_use]
    pub fn to_draft_request(&self) -> CreateDraftRequest {
        CreateDraftRequest::new()
            .to(self.to.clone())
            .subject(self.subject.clone())
            .body(self.body.clone())
            .attachments(self.attachments.clone())
    }

    /// Builds a send request carrying this content.
    #[must_use]
    pub fn to_send_request(&self) -> SendMessageRequest {
        SendMessageRequest::new(self.to.clone())
            .subject(self.subject.clone())
            .body(self.body.clone())
            .attachments(self.attachments.clone())
    }
}

// ============================================================================
// SECTION: Service Trait
// ============================================================================

/// Email-service operations used by the scenarios.
pub trait MailService {
    /// Creates a draft for `grant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the service rejects the draft or the request fails.
    fn create_draft(&self, grant_id: &str, request: &CreateDraftRequest)
    -> Result<Draft, MailError>;

    /// Sends a message for `grant_id` without creating a draft.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the service rejects the message or the request fails.
    fn send_message(
        &self,
        grant_id: &str,
        request: &SendMessageRequest,
    ) -> Result<Message, MailError>;

    /// Submits `message` through the given call shape and returns the new object id.
    ///
    /// # Errors
    ///
    /// Returns the [`MailError`] produced by the underlying call.
    fn submit(
        &self,
        call: CallShape,
        grant_id: &str,
        message: &OutgoingMessage,
    ) -> Result<String, MailError> {
        match call {
            CallShape::Draft => {
                self.create_draft(grant_id, &message.to_draft_request()).map(|draft| draft.id)
            }
            CallShape::Send => {
                self.send_message(grant_id, &message.to_send_request()).map(|sent| sent.id)
            }
        }
    }
}
