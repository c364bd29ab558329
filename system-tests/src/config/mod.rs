// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for mail-harness system tests.
// Purpose: Provide typed access to environment settings and credentials.
// Dependencies: mail-harness-client, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! System-test configuration is read from environment variables and an
//! optional TOML credentials file, then mapped into small typed structures for
//! reuse across test helpers.
//! Invariants:
//! - Environment values are valid UTF-8 and non-empty when set.
//! - Environment overrides take precedence over the credentials file.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod credentials;
mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use credentials::ConfigError;
pub use credentials::CredentialEnv;
pub use credentials::Credentials;
pub use credentials::DEFAULT_CREDENTIALS_PATH;
pub use credentials::Nylas2Section;
pub use credentials::Nylas3Section;
pub use credentials::Provider;
pub use credentials::Secret;
pub use credentials::TestSection;
pub use credentials::V2Settings;
pub use credentials::V3Settings;
pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::read_env_strict;
