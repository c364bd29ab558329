// system-tests/tests/suites/live_max_size.rs
// ============================================================================
// Module: Live Max Size Tests
// Description: Oversized-attachment behavior against the real service.
// Purpose: Observe the draft/send asymmetry for each mailbox provider.
// Dependencies: system-tests helpers
// ============================================================================

//! ## Overview
//! Oversized-attachment behavior against the real service.
//! Invariants:
//! - Drafts are rejected with a `provider_error` naming the size problem.
//! - Direct sends end with the service closing the connection.
//! - Missing credentials fail the test with the key that must be set.

use helpers::artifacts::TestReporter;
use helpers::scenarios::expect_signal;
use helpers::scenarios::fixture_dir;
use helpers::scenarios::live_client;
use helpers::scenarios::message_with_attachment;
use helpers::scenarios::oversized_fixture;
use mail_harness_client::AttachmentTooLarge;
use mail_harness_client::CallShape;
use system_tests::config::Credentials;
use system_tests::config::Provider;
use system_tests::config::SystemTestConfig;

use crate::helpers;

fn live_oversized(provider: Provider, call: CallShape) -> Result<(), Box<dyn std::error::Error>> {
    let test_name = format!("live_oversized_{call}_{}", provider.as_str());
    let mut reporter = TestReporter::new(&test_name)?;
    let config = SystemTestConfig::load()?;
    let credentials = Credentials::load(&config)?;
    let settings = credentials.require_v3(provider)?;
    let client = live_client(&settings, &config)?;
    let dir = fixture_dir(&config)?;
    let fixture = oversized_fixture(&dir)?;
    let message = message_with_attachment(&settings.email_to, &fixture)?;

    let signal = expect_signal(&client, &credentials.matchers, call, &settings.grant_id, &message)?;
    if let AttachmentTooLarge::ProviderRejection {
        category,
        ..
    } = &signal
    {
        assert_eq!(category, "provider_error");
    }

    reporter.artifacts().write_json("signal.json", &signal)?;
    reporter.finish(
        "pass",
        vec![format!("oversized {call} produced {:?}", signal.kind())],
        vec!["signal.json".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[test]
fn live_oversized_draft_google() -> Result<(), Box<dyn std::error::Error>> {
    live_oversized(Provider::Google, CallShape::Draft)
}

#[test]
fn live_oversized_draft_microsoft() -> Result<(), Box<dyn std::error::Error>> {
    live_oversized(Provider::Microsoft, CallShape::Draft)
}

#[test]
fn live_oversized_send_google() -> Result<(), Box<dyn std::error::Error>> {
    live_oversized(Provider::Google, CallShape::Send)
}

#[test]
fn live_oversized_send_microsoft() -> Result<(), Box<dyn std::error::Error>> {
    live_oversized(Provider::Microsoft, CallShape::Send)
}
