// crates/mail-harness-client/src/v3.rs
// ============================================================================
// Module: v3 Client
// Description: Grant-scoped drafts and messages endpoints of the v3 API.
// Purpose: Issue the create-draft and send-message calls with attachments.
// Dependencies: reqwest, tracing, url
// ============================================================================

//! ## Overview
//! [`NylasClient`] authenticates with a bearer API key and addresses mailboxes
//! by grant identifier. Resource accessors ([`NylasClient::drafts`],
//! [`NylasClient::messages`]) borrow the client and expose one method each.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::error::MailError;
use crate::service::MailService;
use crate::transport::HttpSettings;
use crate::transport::build_http_client;
use crate::transport::endpoint;
use crate::transport::execute;
use crate::transport::parse_base_url;
use crate::transport::with_body;
use crate::types::ApiResponse;
use crate::types::CreateDraftRequest;
use crate::types::Draft;
use crate::types::Message;
use crate::types::SendMessageRequest;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default v3 API base URI (US region).
pub const DEFAULT_API_URI: &str = "https://api.us.nylas.com";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`NylasClient`].
#[derive(Clone)]
pub struct NylasClientBuilder {
    /// API key used as the bearer token.
    api_key: String,
    /// API base URI.
    api_uri: String,
    /// HTTP settings.
    settings: HttpSettings,
}

impl NylasClientBuilder {
    /// Starts a builder for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_uri: DEFAULT_API_URI.to_string(),
            settings: HttpSettings::default(),
        }
    }

    /// Overrides the API base URI.
    #[must_use]
    pub fn api_uri(mut self, api_uri: impl Into<String>) -> Self {
        self.api_uri = api_uri.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Overrides the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Config`] when the API key is empty, the URI is
    /// invalid, or the HTTP client cannot be built.
    pub fn build(self) -> Result<NylasClient, MailError> {
        if self.api_key.trim().is_empty() {
            return Err(MailError::Config("api key must not be empty".to_string()));
        }
        Ok(NylasClient {
            http: build_http_client(&self.settings)?,
            api_uri: parse_base_url(&self.api_uri)?,
            api_key: self.api_key,
        })
    }
}

impl fmt::Debug for NylasClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NylasClientBuilder")
            .field("api_key", &"<redacted>")
            .field("api_uri", &self.api_uri)
            .field("settings", &self.settings)
            .finish()
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// v3 API client.
#[derive(Clone)]
pub struct NylasClient {
    /// Underlying HTTP client.
    http: Client,
    /// API base URI.
    api_uri: Url,
    /// API key used as the bearer token.
    api_key: String,
}

impl NylasClient {
    /// Starts a builder for the given API key.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> NylasClientBuilder {
        NylasClientBuilder::new(api_key)
    }

    /// Returns the configured API base URI.
    #[must_use]
    pub const fn api_uri(&self) -> &Url {
        &self.api_uri
    }

    /// Returns the drafts resource.
    #[must_use]
    pub const fn drafts(&self) -> Drafts<'_> {
        Drafts {
            client: self,
        }
    }

    /// Returns the messages resource.
    #[must_use]
    pub const fn messages(&self) -> Messages<'_> {
        Messages {
            client: self,
        }
    }

    /// Resolves a grant-scoped endpoint.
    fn grant_endpoint(&self, grant_id: &str, tail: &[&str]) -> Result<Url, MailError> {
        if grant_id.trim().is_empty() {
            return Err(MailError::Config("grant id must not be empty".to_string()));
        }
        let mut segments = vec!["v3", "grants", grant_id];
        segments.extend_from_slice(tail);
        endpoint(&self.api_uri, &segments)
    }
}

impl fmt::Debug for NylasClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NylasClient")
            .field("api_key", &"<redacted>")
            .field("api_uri", &self.api_uri.as_str())
            .finish_non_exhaustive()
    }
}

/// Drafts resource of a [`NylasClient`].
#[derive(Debug, Clone, Copy)]
pub struct Drafts<'a> {
    /// Owning client.
    client: &'a NylasClient,
}

impl Drafts<'_> {
    /// Creates a draft for `grant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Api`] when the service rejects the draft, or the
    /// mapped transport error when no response is received.
    pub fn create(
        &self,
        grant_id: &str,
        request: &CreateDraftRequest,
    ) -> Result<ApiResponse<Draft>, MailError> {
        let url = self.client.grant_endpoint(grant_id, &["drafts"])?;
        debug!(%url, attachments = request.attachments.len(), "creating draft");
        let builder = self.client.http.post(url).bearer_auth(&self.client.api_key);
        execute(with_body(builder, request, &request.attachments)?)
    }
}

/// Messages resource of a [`NylasClient`].
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    /// Owning client.
    client: &'a NylasClient,
}

impl Messages<'_> {
    /// Sends a message for `grant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Api`] when the service rejects the message, or
    /// [`MailError::RemoteClosed`] when the service drops the connection.
    pub fn send(
        &self,
        grant_id: &str,
        request: &SendMessageRequest,
    ) -> Result<ApiResponse<Message>, MailError> {
        let url = self.client.grant_endpoint(grant_id, &["messages", "send"])?;
        debug!(%url, attachments = request.attachments.len(), "sending message");
        let builder = self.client.http.post(url).bearer_auth(&self.client.api_key);
        execute(with_body(builder, request, &request.attachments)?)
    }
}

impl MailService for NylasClient {
    fn create_draft(
        &self,
        grant_id: &str,
        request: &CreateDraftRequest,
    ) -> Result<Draft, MailError> {
        self.drafts().create(grant_id, request).map(|response| response.data)
    }

    fn send_message(
        &self,
        grant_id: &str,
        request: &SendMessageRequest,
    ) -> Result<Message, MailError> {
        self.messages().send(grant_id, request).map(|response| response.data)
    }
}
