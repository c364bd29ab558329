// system-tests/src/config/credentials.rs
// ============================================================================
// Module: Provider Credentials
// Description: TOML credentials file with environment overrides.
// Purpose: Resolve the API keys, grants, and addresses the live suites need.
// Dependencies: mail-harness-client, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Live suites talk to the real email service and need an API key, one grant
//! per mailbox provider, a v2 access token, and sender/recipient addresses.
//! These come from a TOML file (by default `resources/test.toml`, ignored by
//! version control) and can each be overridden by an environment variable.
//! Invariants:
//! - Secrets never appear in `Debug` output.
//! - A missing required value is reported with both its file key and its
//!   environment variable.
//! - An explicitly configured credentials file must exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use mail_harness_client::FailureMatchers;
use serde::Deserialize;
use thiserror::Error;

use super::env::SystemTestConfig;
use super::env::read_env_nonempty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Credentials file used when no override is configured, relative to the
/// system-tests crate.
pub const DEFAULT_CREDENTIALS_PATH: &str = "resources/test.toml";

/// Default v3 API base URI.
const DEFAULT_V3_API_URI: &str = mail_harness_client::v3::DEFAULT_API_URI;

/// Default v2 API base URI.
const DEFAULT_V2_API_URI: &str = mail_harness_client::v2::DEFAULT_API_URI;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Credential loading errors.
///
/// # Invariants
/// - Variants are stable for test assertions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value failed strict parsing.
    #[error("{0}")]
    Env(String),
    /// The credentials file could not be read.
    #[error("failed to read credentials file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The credentials file is not valid TOML for the expected layout.
    #[error("invalid credentials file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
    /// A required credential was not provided.
    #[error("missing credential {key} (set it in the credentials file or via {env})")]
    Missing {
        /// Key in the credentials file.
        key: &'static str,
        /// Environment variable that overrides the key.
        env: &'static str,
    },
}

// ============================================================================
// SECTION: Secrets
// ============================================================================

/// Credential value that is redacted from debug output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

// ============================================================================
// SECTION: Override Keys
// ============================================================================

/// Environment variables that override individual credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialEnv {
    /// v3 API key.
    Nylas3ApiKey,
    /// v3 API base URI.
    Nylas3ApiUri,
    /// v3 grant for the Google mailbox.
    Nylas3GrantGoogle,
    /// v3 grant for the Microsoft mailbox.
    Nylas3GrantOutlook,
    /// v2 access token.
    Nylas2AccessToken,
    /// v2 API base URI.
    Nylas2ApiUri,
    /// Sender address.
    EmailFrom,
    /// Recipient address.
    EmailTo,
}

impl CredentialEnv {
    /// All override keys.
    pub const ALL: [Self; 8] = [
        Self::Nylas3ApiKey,
        Self::Nylas3ApiUri,
        Self::Nylas3GrantGoogle,
        Self::Nylas3GrantOutlook,
        Self::Nylas2AccessToken,
        Self::Nylas2ApiUri,
        Self::EmailFrom,
        Self::EmailTo,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nylas3ApiKey => "MAIL_HARNESS_NYLAS3_API_KEY",
            Self::Nylas3ApiUri => "MAIL_HARNESS_NYLAS3_API_URI",
            Self::Nylas3GrantGoogle => "MAIL_HARNESS_NYLAS3_GRANT_ID_GOOGLE",
            Self::Nylas3GrantOutlook => "MAIL_HARNESS_NYLAS3_GRANT_ID_OUTLOOK",
            Self::Nylas2AccessToken => "MAIL_HARNESS_NYLAS2_ACCESS_TOKEN",
            Self::Nylas2ApiUri => "MAIL_HARNESS_NYLAS2_API_URI",
            Self::EmailFrom => "MAIL_HARNESS_TEST_EMAIL_FROM",
            Self::EmailTo => "MAIL_HARNESS_TEST_EMAIL_TO",
        }
    }

    /// Returns the dotted key of the value in the credentials file.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nylas3ApiKey => "nylas3.api_key",
            Self::Nylas3ApiUri => "nylas3.api_uri",
            Self::Nylas3GrantGoogle => "nylas3.grant_id_google",
            Self::Nylas3GrantOutlook => "nylas3.grant_id_outlook",
            Self::Nylas2AccessToken => "nylas2.access_token",
            Self::Nylas2ApiUri => "nylas2.api_uri",
            Self::EmailFrom => "test.email_from",
            Self::EmailTo => "test.email_to",
        }
    }

    /// Returns the error reported when this credential is absent.
    const fn missing(self) -> ConfigError {
        ConfigError::Missing {
            key: self.key(),
            env: self.as_str(),
        }
    }
}

// ============================================================================
// SECTION: Providers
// ============================================================================

/// Mailbox provider behind a v3 grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Google mailbox.
    Google,
    /// Microsoft (Outlook) mailbox.
    Microsoft,
}

impl Provider {
    /// Returns a stable label for the provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Microsoft => "microsoft",
        }
    }

    /// Returns the override key holding this provider's grant.
    #[must_use]
    pub const fn grant_env(self) -> CredentialEnv {
        match self {
            Self::Google => CredentialEnv::Nylas3GrantGoogle,
            Self::Microsoft => CredentialEnv::Nylas3GrantOutlook,
        }
    }
}

// ============================================================================
// SECTION: File Layout
// ============================================================================

/// `[nylas3]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Nylas3Section {
    /// API key.
    pub api_key: Option<Secret>,
    /// API base URI.
    pub api_uri: Option<String>,
    /// Grant for the Google mailbox.
    pub grant_id_google: Option<String>,
    /// Grant for the Microsoft mailbox.
    pub grant_id_outlook: Option<String>,
}

/// `[nylas2]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Nylas2Section {
    /// Account access token.
    pub access_token: Option<Secret>,
    /// API base URI.
    pub api_uri: Option<String>,
}

/// `[test]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestSection {
    /// Sender address.
    pub email_from: Option<String>,
    /// Recipient address.
    pub email_to: Option<String>,
}

/// Provider credentials and classification matchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Credentials {
    /// v3 settings.
    pub nylas3: Nylas3Section,
    /// v2 settings.
    pub nylas2: Nylas2Section,
    /// Test addresses.
    pub test: TestSection,
    /// Oversized-attachment matchers.
    pub matchers: FailureMatchers,
}

// ============================================================================
// SECTION: Resolved Settings
// ============================================================================

/// Everything a v3 scenario needs for one grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V3Settings {
    /// API key.
    pub api_key: Secret,
    /// API base URI.
    pub api_uri: String,
    /// Grant identifier.
    pub grant_id: String,
    /// Recipient address.
    pub email_to: String,
}

/// Everything a v2 scenario needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2Settings {
    /// Account access token.
    pub access_token: Secret,
    /// API base URI.
    pub api_uri: String,
    /// Sender address.
    pub email_from: String,
    /// Recipient address.
    pub email_to: String,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl Credentials {
    /// Loads credentials for the given system-test configuration.
    ///
    /// Reads `config.credentials_file` when set, otherwise
    /// [`DEFAULT_CREDENTIALS_PATH`] if it exists, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or an
    /// override is not valid UTF-8 or empty.
    pub fn load(config: &SystemTestConfig) -> Result<Self, ConfigError> {
        let mut credentials = match &config.credentials_file {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CREDENTIALS_PATH);
                if path.is_file() { Self::from_file(path)? } else { Self::default() }
            }
        };
        credentials.apply_env_overrides()?;
        Ok(credentials)
    }

    /// Reads and parses a credentials file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces file values with any environment overrides that are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when an override is invalid.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        for key in CredentialEnv::ALL {
            let Some(value) = read_env_nonempty(key.as_str()).map_err(ConfigError::Env)? else {
                continue;
            };
            match key {
                CredentialEnv::Nylas3ApiKey => self.nylas3.api_key = Some(Secret::new(value)),
                CredentialEnv::Nylas3ApiUri => self.nylas3.api_uri = Some(value),
                CredentialEnv::Nylas3GrantGoogle => self.nylas3.grant_id_google = Some(value),
                CredentialEnv::Nylas3GrantOutlook => self.nylas3.grant_id_outlook = Some(value),
                CredentialEnv::Nylas2AccessToken => {
                    self.nylas2.access_token = Some(Secret::new(value));
                }
                CredentialEnv::Nylas2ApiUri => self.nylas2.api_uri = Some(value),
                CredentialEnv::EmailFrom => self.test.email_from = Some(value),
                CredentialEnv::EmailTo => self.test.email_to = Some(value),
            }
        }
        Ok(())
    }

    /// Resolves the v3 settings for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent value.
    pub fn require_v3(&self, provider: Provider) -> Result<V3Settings, ConfigError> {
        let grant = match provider {
            Provider::Google => &self.nylas3.grant_id_google,
            Provider::Microsoft => &self.nylas3.grant_id_outlook,
        };
        Ok(V3Settings {
            api_key: required_secret(self.nylas3.api_key.as_ref(), CredentialEnv::Nylas3ApiKey)?,
            api_uri: optional_or(self.nylas3.api_uri.as_deref(), DEFAULT_V3_API_URI),
            grant_id: required(grant.as_deref(), provider.grant_env())?,
            email_to: required(self.test.email_to.as_deref(), CredentialEnv::EmailTo)?,
        })
    }

    /// Resolves the v2 settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent value.
    pub fn require_v2(&self) -> Result<V2Settings, ConfigError> {
        Ok(V2Settings {
            access_token: required_secret(
                self.nylas2.access_token.as_ref(),
                CredentialEnv::Nylas2AccessToken,
            )?,
            api_uri: optional_or(self.nylas2.api_uri.as_deref(), DEFAULT_V2_API_URI),
            email_from: required(self.test.email_from.as_deref(), CredentialEnv::EmailFrom)?,
            email_to: required(self.test.email_to.as_deref(), CredentialEnv::EmailTo)?,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns a non-blank value or the matching missing-credential error.
fn required(value: Option<&str>, key: CredentialEnv) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(key.missing()),
    }
}

/// Secret variant of [`required`].
fn required_secret(value: Option<&Secret>, key: CredentialEnv) -> Result<Secret, ConfigError> {
    required(value.map(Secret::expose), key).map(Secret::new)
}

/// Returns a non-blank value or `default`.
fn optional_or(value: Option<&str>, default: &str) -> String {
    value.filter(|value| !value.trim().is_empty()).unwrap_or(default).to_string()
}
