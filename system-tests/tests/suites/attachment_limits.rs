// system-tests/tests/suites/attachment_limits.rs
// ============================================================================
// Module: Attachment Limit Tests
// Description: Oversized-attachment behavior against the provider stub.
// Purpose: Pin the draft/send failure asymmetry and fixture cleanup.
// Dependencies: system-tests helpers
// ============================================================================

//! ## Overview
//! Oversized-attachment behavior against the provider stub.
//! Invariants:
//! - An oversized draft yields a provider rejection.
//! - An oversized direct send yields a transport close.
//! - Generated fixtures never outlive their scenario.

use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::thread;

use helpers::artifacts::TestReporter;
use helpers::provider_stub::StubOptions;
use helpers::provider_stub::StubOutcome;
use helpers::provider_stub::snapshot;
use helpers::provider_stub::spawn_provider_stub;
use helpers::scenarios::STUB_RECIPIENT;
use helpers::scenarios::expect_signal;
use helpers::scenarios::fixture_dir;
use helpers::scenarios::message_with_attachment;
use helpers::scenarios::oversized_fixture;
use helpers::scenarios::sized_fixture;
use helpers::scenarios::stub_client;
use mail_harness_client::AttachmentTooLarge;
use mail_harness_client::CallShape;
use mail_harness_client::FailureMatchers;
use mail_harness_client::MailError;
use mail_harness_client::MailService;
use mail_harness_client::SignalKind;
use mail_harness_fixtures::OVERSIZED_ATTACHMENT_BYTES;
use mail_harness_fixtures::PROVIDER_ATTACHMENT_LIMIT;
use system_tests::config::SystemTestConfig;

use crate::helpers;

const STUB_GRANT: &str = "grant-stub";

#[test]
fn oversized_draft_is_rejected_by_provider() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("oversized_draft_is_rejected_by_provider")?;
    let config = SystemTestConfig::load()?;
    let stub = spawn_provider_stub(StubOptions::default())?;
    let client = stub_client(&stub, &config)?;
    let dir = fixture_dir(&config)?;
    let fixture = oversized_fixture(&dir)?;
    assert_eq!(fixture.len(), OVERSIZED_ATTACHMENT_BYTES);
    let message = message_with_attachment(STUB_RECIPIENT, &fixture)?;

    let matchers = FailureMatchers::default().with_rejection_categories(["provider_error"]);
    let signal = expect_signal(&client, &matchers, CallShape::Draft, STUB_GRANT, &message)?;
    let AttachmentTooLarge::ProviderRejection {
        category,
        detail,
        ..
    } = &signal
    else {
        return Err(format!("expected provider rejection, got {signal:?}").into());
    };
    assert_eq!(category, "provider_error");
    assert!(detail.to_lowercase().contains("too large"), "detail: {detail}");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].outcome, StubOutcome::Rejected);
    assert!(requests[0].body_bytes > PROVIDER_ATTACHMENT_LIMIT);

    reporter.artifacts().write_json("signal.json", &signal)?;
    reporter.artifacts().write_json("stub_requests.json", &requests)?;
    reporter.finish(
        "pass",
        vec!["oversized draft rejected with provider_error".to_string()],
        vec!["signal.json".to_string(), "stub_requests.json".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[test]
fn oversized_send_closes_connection() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("oversized_send_closes_connection")?;
    let config = SystemTestConfig::load()?;
    let stub = spawn_provider_stub(StubOptions::default())?;
    let client = stub_client(&stub, &config)?;
    let dir = fixture_dir(&config)?;
    let fixture = oversized_fixture(&dir)?;
    let message = message_with_attachment(STUB_RECIPIENT, &fixture)?;

    let signal = expect_signal(
        &client,
        &FailureMatchers::default(),
        CallShape::Send,
        STUB_GRANT,
        &message,
    )?;
    assert_eq!(signal.kind(), SignalKind::TransportClosed);
    assert_eq!(signal.call(), CallShape::Send);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].outcome, StubOutcome::Closed);
    assert_eq!(requests[0].path, format!("/v3/grants/{STUB_GRANT}/messages/send"));
    assert!(requests[0].declared_length.is_some_and(|len| len > PROVIDER_ATTACHMENT_LIMIT));
    assert_eq!(requests[0].body_bytes, 0);

    reporter.artifacts().write_json("signal.json", &signal)?;
    reporter.artifacts().write_json("stub_requests.json", &requests)?;
    reporter.finish(
        "pass",
        vec!["oversized send closed by the service".to_string()],
        vec!["signal.json".to_string(), "stub_requests.json".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[test]
fn attachment_within_limit_is_accepted_by_both_calls() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("attachment_within_limit_is_accepted_by_both_calls")?;
    let config = SystemTestConfig::load()?;
    let stub = spawn_provider_stub(StubOptions::default())?;
    let client = stub_client(&stub, &config)?;
    let dir = fixture_dir(&config)?;
    let fixture = sized_fixture(&dir, "small_attachment.txt", 64 * 1024)?;
    let message = message_with_attachment(STUB_RECIPIENT, &fixture)?;

    let draft_id = client.submit(CallShape::Draft, STUB_GRANT, &message)?;
    let message_id = client.submit(CallShape::Send, STUB_GRANT, &message)?;
    assert!(draft_id.starts_with("draft-"));
    assert!(message_id.starts_with("message-"));

    let requests = stub.requests();
    assert!(requests.iter().all(|request| request.outcome == StubOutcome::Accepted));
    assert!(requests.iter().all(|request| {
        request.content_type.as_deref().is_some_and(|value| value.starts_with("multipart/form-data"))
    }));

    reporter.artifacts().write_json("stub_requests.json", &requests)?;
    reporter.finish(
        "pass",
        vec![format!("draft {draft_id} and message {message_id} accepted")],
        vec!["stub_requests.json".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[test]
fn rejected_credentials_are_not_a_size_signal() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("rejected_credentials_are_not_a_size_signal")?;
    let config = SystemTestConfig::load()?;
    let stub = spawn_provider_stub(StubOptions {
        api_key: "other-key".to_string(),
        ..StubOptions::default()
    })?;
    let client = mail_harness_client::NylasClient::builder("wrong-key")
        .api_uri(stub.base_url())
        .build()?;
    let dir = fixture_dir(&config)?;
    let fixture = sized_fixture(&dir, "small_attachment.txt", 1024)?;
    let message = message_with_attachment(STUB_RECIPIENT, &fixture)?;

    let err = client.submit(CallShape::Draft, STUB_GRANT, &message).err().ok_or("draft succeeded")?;
    let api = err.as_api().ok_or("expected an api error")?;
    assert_eq!(api.status, 401);
    assert!(FailureMatchers::default().classify(CallShape::Draft, &err).is_none());
    assert!(matches!(err, MailError::Api(_)));

    reporter.finish("pass", vec!["401 not classified as oversized".to_string()], Vec::new())?;
    drop(reporter);
    Ok(())
}

#[test]
#[allow(clippy::panic, reason = "The scenario must unwind to exercise fixture cleanup.")]
fn fixture_is_removed_when_scenario_panics() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("fixture_is_removed_when_scenario_panics")?;
    let config = SystemTestConfig::load()?;
    let dir = fixture_dir(&config)?;
    let path = dir.path().join("file_too_large.txt");

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let fixture = sized_fixture(&dir, "file_too_large.txt", 256 * 1024)
            .unwrap_or_else(|err| panic!("fixture creation failed: {err}"));
        assert!(fixture.path().exists());
        panic!("scenario failed after fixture creation");
    }));
    assert!(outcome.is_err());
    assert!(!path.exists(), "fixture left behind at {}", path.display());

    reporter.finish("pass", vec!["fixture removed during unwinding".to_string()], Vec::new())?;
    drop(reporter);
    Ok(())
}

#[test]
#[allow(clippy::panic, reason = "The recording thread must panic to poison the lock.")]
fn recorded_requests_survive_a_poisoned_lock() {
    let entries = Arc::new(Mutex::new(vec!["first".to_string()]));
    let writer = Arc::clone(&entries);
    let outcome = thread::spawn(move || {
        let mut guard = writer.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push("second".to_string());
        panic!("recording thread failed");
    })
    .join();
    assert!(outcome.is_err());
    assert!(entries.is_poisoned());
    assert_eq!(snapshot(&entries), vec!["first".to_string(), "second".to_string()]);
}
