// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for mail-harness system-tests.
// Purpose: Provide the provider stub, scenario steps, and artifact utilities.
// Dependencies: system-tests, mail-harness-client, mail-harness-fixtures
// ============================================================================

//! ## Overview
//! Shared helpers for mail-harness system-tests.
//! Invariants:
//! - Stub-driven scenarios never leave the loopback interface.
//! - Generated fixtures are removed even when a scenario panics.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
