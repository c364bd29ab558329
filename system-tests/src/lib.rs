// system-tests/src/lib.rs
// ============================================================================
// Module: Mail Harness System Tests Library
// Description: Shared configuration for the scenario suites.
// Purpose: Provide typed environment and credential settings to system tests.
// Dependencies: mail-harness-client, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate hosts the configuration used by the mail-harness system-test
//! binaries in `system-tests/tests`. Stub-driven suites only need the
//! environment settings; live suites additionally load provider credentials
//! and fail closed when any required value is missing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
