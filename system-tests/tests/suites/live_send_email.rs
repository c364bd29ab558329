// system-tests/tests/suites/live_send_email.rs
// ============================================================================
// Module: Live Send Email Tests
// Description: Draft creation and v2 sends against the real service.
// Purpose: Confirm the configured grants and tokens are usable.
// Dependencies: system-tests helpers
// ============================================================================

//! ## Overview
//! Draft creation and v2 sends against the real service.
//! Invariants:
//! - Missing credentials fail the test with the key that must be set.
//! - Drafts carry no attachments.

use helpers::artifacts::TestReporter;
use helpers::scenarios::TEST_SUBJECT;
use helpers::scenarios::live_client;
use helpers::scenarios::plain_message;
use helpers::scenarios::scenario_timeout;
use mail_harness_client::CallShape;
use mail_harness_client::HttpSettings;
use mail_harness_client::MailService;
use mail_harness_client::NylasV2Client;
use mail_harness_client::v2::DraftV2;
use mail_harness_client::v2::NameEmail;
use system_tests::config::Credentials;
use system_tests::config::Provider;
use system_tests::config::SystemTestConfig;

use crate::helpers;

fn live_draft(provider: Provider, body: &str) -> Result<(), Box<dyn std::error::Error>> {
    let test_name = format!("live_draft_{}", provider.as_str());
    let mut reporter = TestReporter::new(&test_name)?;
    let config = SystemTestConfig::load()?;
    let settings = Credentials::load(&config)?.require_v3(provider)?;
    let client = live_client(&settings, &config)?;

    let message = plain_message(&settings.email_to, body);
    let draft_id = client.submit(CallShape::Draft, &settings.grant_id, &message)?;
    assert!(!draft_id.is_empty());

    reporter.finish("pass", vec![format!("draft {draft_id} created")], Vec::new())?;
    drop(reporter);
    Ok(())
}

#[test]
fn live_draft_google() -> Result<(), Box<dyn std::error::Error>> {
    live_draft(Provider::Google, "This is a test email using Google.")
}

#[test]
fn live_draft_microsoft() -> Result<(), Box<dyn std::error::Error>> {
    live_draft(Provider::Microsoft, "This is a test email using Microsoft.")
}

#[test]
fn live_v2_send() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("live_v2_send")?;
    let config = SystemTestConfig::load()?;
    let settings = Credentials::load(&config)?.require_v2()?;
    let http = HttpSettings {
        timeout: scenario_timeout(&config),
        ..HttpSettings::default()
    };
    let client = NylasV2Client::with_settings(&settings.api_uri, &http)?;
    let draft = DraftV2 {
        from: vec![NameEmail::new(settings.email_from.as_str(), settings.email_from.as_str())],
        to: vec![NameEmail::new(settings.email_to.as_str(), settings.email_to.as_str())],
        subject: format!("Nylas API v2 {TEST_SUBJECT}"),
        body: "This is a test email using Nylas API v2.".to_string(),
    };

    let message = client.account(settings.access_token.expose()).drafts().send(&draft)?;
    assert!(!message.id.is_empty());

    reporter.finish("pass", vec![format!("v2 message {} sent", message.id)], Vec::new())?;
    drop(reporter);
    Ok(())
}
