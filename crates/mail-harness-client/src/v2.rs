// crates/mail-harness-client/src/v2.rs
// ============================================================================
// Module: v2 Client
// Description: Access-token scoped draft sending for the legacy v2 API.
// Purpose: Cover the v2 send path alongside the v3 calls.
// Dependencies: reqwest, serde, tracing, url
// ============================================================================

//! ## Overview
//! The v2 API scopes requests to an account through its access token rather
//! than a grant identifier. Only the "send draft" call is covered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::MailError;
use crate::transport::HttpSettings;
use crate::transport::build_http_client;
use crate::transport::endpoint;
use crate::transport::execute;
use crate::transport::parse_base_url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default v2 API base URI.
pub const DEFAULT_API_URI: &str = "https://api.nylas.com";

// ============================================================================
// SECTION: Types
// ============================================================================

/// v2 address with display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEmail {
    /// Display name.
    pub name: String,
    /// Address.
    pub email: String,
}

impl NameEmail {
    /// Creates an address.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// v2 draft payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftV2 {
    /// Sender addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<NameEmail>,
    /// Recipients.
    pub to: Vec<NameEmail>,
    /// Subject line.
    pub subject: String,
    /// Body.
    pub body: String,
}

/// v2 message returned after sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageV2 {
    /// Message identifier.
    pub id: String,
    /// Account the message belongs to.
    pub account_id: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Object kind, `message`.
    pub object: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// v2 API client.
#[derive(Debug, Clone)]
pub struct NylasV2Client {
    /// Underlying HTTP client.
    http: Client,
    /// API base URI.
    api_uri: Url,
}

impl NylasV2Client {
    /// Creates a client for the default API URI.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Config`] when the HTTP client cannot be built.
    pub fn new() -> Result<Self, MailError> {
        Self::with_settings(DEFAULT_API_URI, &HttpSettings::default())
    }

    /// Creates a client for `api_uri` with explicit HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Config`] when the URI is invalid or the HTTP client
    /// cannot be built.
    pub fn with_settings(api_uri: &str, settings: &HttpSettings) -> Result<Self, MailError> {
        Ok(Self {
            http: build_http_client(settings)?,
            api_uri: parse_base_url(api_uri)?,
        })
    }

    /// Returns an account handle authenticated by `access_token`.
    #[must_use]
    pub fn account(&self, access_token: impl Into<String>) -> Account<'_> {
        Account {
            client: self,
            access_token: access_token.into(),
        }
    }
}

/// Account handle scoped by access token.
pub struct Account<'a> {
    /// Owning client.
    client: &'a NylasV2Client,
    /// Access token used as the bearer token.
    access_token: String,
}

impl fmt::Debug for Account<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("api_uri", &self.client.api_uri.as_str())
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl Account<'_> {
    /// Returns the drafts resource for this account.
    #[must_use]
    pub const fn drafts(&self) -> DraftsV2<'_> {
        DraftsV2 {
            account: self,
        }
    }
}

/// Drafts resource of an [`Account`].
#[derive(Debug, Clone, Copy)]
pub struct DraftsV2<'a> {
    /// Owning account.
    account: &'a Account<'a>,
}

impl DraftsV2<'_> {
    /// Sends `draft` immediately.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Api`] when the service rejects the draft, or the
    /// mapped transport error when no response is received.
    pub fn send(&self, draft: &DraftV2) -> Result<MessageV2, MailError> {
        if self.account.access_token.trim().is_empty() {
            return Err(MailError::Config("access token must not be empty".to_string()));
        }
        let client = self.account.client;
        let url = endpoint(&client.api_uri, &["send"])?;
        debug!(%url, recipients = draft.to.len(), "sending v2 draft");
        let request = client.http.post(url).bearer_auth(&self.account.access_token).json(draft);
        execute(request)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "v2_tests.rs"]
mod tests;
