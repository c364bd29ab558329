// crates/mail-harness-client/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: Shared request plumbing for the v2 and v3 clients.
// Purpose: Build clients, encode bodies, and map failures into MailError.
// Dependencies: reqwest, hyper, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! Requests carrying attachments are sent as `multipart/form-data`: a
//! `message` part with the JSON request and one `file{index}` part per
//! attachment, streamed from disk. Requests without attachments are plain JSON.
//! Invariants:
//! - A connection dropped by the peer before a response is always reported as
//!   [`MailError::RemoteClosed`], never as a generic transport failure.
//! - Non-success responses are parsed into [`MailError::Api`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::multipart::Part;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::error::MailError;
use crate::error::REMOTE_CLOSED_MESSAGE;
use crate::types::Attachment;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Default request timeout; large uploads need generous headroom.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// HTTP client settings shared by both API versions.
///
/// # Invariants
/// - `timeout` applies to the full request lifecycle, including upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("mail-harness/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Builds a blocking HTTP client from settings.
///
/// # Errors
///
/// Returns [`MailError::Config`] when the client cannot be built.
pub fn build_http_client(settings: &HttpSettings) -> Result<Client, MailError> {
    Client::builder()
        .timeout(settings.timeout)
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|err| MailError::Config(format!("http client build failed: {err}")))
}

// ============================================================================
// SECTION: URLs
// ============================================================================

/// Parses an API base URI.
///
/// # Errors
///
/// Returns [`MailError::Config`] when the URI is invalid or cannot take a path.
pub fn parse_base_url(raw: &str) -> Result<Url, MailError> {
    let url = Url::parse(raw).map_err(|err| MailError::Config(format!("invalid api uri: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(MailError::Config(format!("api uri cannot be a base: {raw}")));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to `base`.
///
/// # Errors
///
/// Returns [`MailError::Config`] when `base` cannot take path segments.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, MailError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| MailError::Config(format!("api uri cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

// ============================================================================
// SECTION: Bodies
// ============================================================================

/// Attaches `payload` as JSON, or as multipart when attachments are present.
///
/// # Errors
///
/// Returns [`MailError`] when serialization fails or an attachment cannot be opened.
pub fn with_body<T: Serialize>(
    request: RequestBuilder,
    payload: &T,
    attachments: &[Attachment],
) -> Result<RequestBuilder, MailError> {
    if attachments.is_empty() {
        return Ok(request.json(payload));
    }
    let message = serde_json::to_string(payload)
        .map_err(|err| MailError::Config(format!("request serialization failed: {err}")))?;
    let mut form = Form::new().part(
        "message",
        Part::text(message)
            .mime_str("application/json")
            .map_err(|err| MailError::Config(err.to_string()))?,
    );
    for (index, attachment) in attachments.iter().enumerate() {
        let part = Part::file(&attachment.path)
            .map_err(|source| MailError::Attachment {
                path: attachment.path.clone(),
                source,
            })?
            .file_name(attachment.filename.clone())
            .mime_str(&attachment.content_type)
            .map_err(|err| MailError::Config(err.to_string()))?;
        form = form.part(format!("file{index}"), part);
    }
    Ok(request.multipart(form))
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Sends a request and decodes a successful JSON body into `T`.
///
/// # Errors
///
/// Returns [`MailError::Api`] for non-success responses and the mapped
/// transport error when no response was received.
pub fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, MailError> {
    let response = request.send().map_err(map_send_error)?;
    decode_response(response)
}

/// Decodes a response, turning non-success statuses into [`MailError::Api`].
///
/// # Errors
///
/// Returns [`MailError`] when the status is not success or decoding fails.
pub fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, MailError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.bytes().map_err(map_read_error)?;
    debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");
    if !status.is_success() {
        return Err(MailError::Api(ApiError::from_body(status.as_u16(), &body)));
    }
    serde_json::from_slice(&body).map_err(|err| MailError::Decode(err.to_string()))
}

/// Maps a failure of `send()`, where no response head was received.
#[must_use]
pub fn map_send_error(err: reqwest::Error) -> MailError {
    let failure = FailureFlags::from_reqwest(&err, false);
    mail_error(failure.classify(&err), &err)
}

/// Maps a failure while reading the body of a received response.
#[must_use]
pub fn map_read_error(err: reqwest::Error) -> MailError {
    let failure = FailureFlags::from_reqwest(&err, true);
    mail_error(failure.classify(&err), &err)
}

/// Builds the client error for a classified failure.
fn mail_error(kind: FailureKind, err: &reqwest::Error) -> MailError {
    match kind {
        FailureKind::Timeout => MailError::Timeout(err.to_string()),
        FailureKind::RemoteClosed => {
            debug!(error = %err, "remote closed connection");
            MailError::RemoteClosed {
                message: REMOTE_CLOSED_MESSAGE.to_string(),
            }
        }
        FailureKind::Transport => MailError::Transport(err.to_string()),
    }
}

// ============================================================================
// SECTION: Failure Classification
// ============================================================================

/// Coarse class of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    /// The request or read deadline elapsed.
    Timeout,
    /// The peer dropped the connection.
    RemoteClosed,
    /// Any other transport failure.
    Transport,
}

/// Failure flags reported by the HTTP client for one failed call.
///
/// # Invariants
/// - A refused or unreachable connection (`connect`) is never a remote close.
/// - Before a response head arrives, a failed request or body upload means
///   the peer stopped reading; streamed multipart bodies surface this as a
///   closed channel with no I/O error in the source chain.
#[allow(clippy::struct_excessive_bools, reason = "Mirrors reqwest's independent error predicates.")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FailureFlags {
    /// Deadline elapsed.
    pub(crate) timeout: bool,
    /// Connection could not be established.
    pub(crate) connect: bool,
    /// Failure while streaming a request or response body.
    pub(crate) body: bool,
    /// Failure while sending the request.
    pub(crate) request: bool,
    /// A response head had already been received.
    pub(crate) responded: bool,
}

impl FailureFlags {
    /// Reads the flags reqwest exposes on `err`.
    fn from_reqwest(err: &reqwest::Error, responded: bool) -> Self {
        Self {
            timeout: err.is_timeout(),
            connect: err.is_connect(),
            body: err.is_body(),
            request: err.is_request(),
            responded,
        }
    }

    /// Classifies the failure from its flags and source chain.
    pub(crate) fn classify(self, err: &(dyn StdError + 'static)) -> FailureKind {
        if self.timeout {
            return FailureKind::Timeout;
        }
        if self.connect {
            return FailureKind::Transport;
        }
        if is_remote_closed(err) || (!self.responded && (self.body || self.request)) {
            return FailureKind::RemoteClosed;
        }
        FailureKind::Transport
    }
}

/// Walks the source chain looking for a peer-initiated connection close.
pub(crate) fn is_remote_closed(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(cause) = current {
        if let Some(hyper_err) = cause.downcast_ref::<hyper::Error>()
            && (hyper_err.is_closed()
                || hyper_err.is_incomplete_message()
                || hyper_err.is_canceled()
                || hyper_err.is_body_write_aborted())
        {
            return true;
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>()
            && matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            )
        {
            return true;
        }
        current = cause.source();
    }
    false
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
