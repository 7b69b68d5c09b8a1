//! Tests for the health monitor lifecycle and the database gate.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{assert_error_envelope, body_json, get, seeded_store, test_monitor, FakeProbe};
use richiesta_api::background::DatabaseStatus;

/// Wait for the next published snapshot, failing the test after a second.
async fn next_snapshot(
    rx: &mut tokio::sync::watch::Receiver<richiesta_api::background::HealthSnapshot>,
) {
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("no snapshot published in time")
        .expect("monitor dropped");
}

// ---------------------------------------------------------------------------
// Test: check_now reflects the probe result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_now_tracks_probe_outcome() {
    let probe = FakeProbe::healthy();
    let monitor = test_monitor(probe.clone());

    assert_eq!(monitor.current().database, DatabaseStatus::Unknown);

    let snapshot = monitor.check_now().await;
    assert_eq!(snapshot.database, DatabaseStatus::Healthy);
    assert!(snapshot.last_checked.is_some());
    assert!(snapshot.last_error.is_none());

    probe.set_failing(true);
    let snapshot = monitor.check_now().await;
    assert_eq!(snapshot.database, DatabaseStatus::Unhealthy);
    assert_eq!(snapshot.last_error.as_deref(), Some("connection refused"));
    assert_eq!(monitor.current(), snapshot);

    probe.set_failing(false);
    assert_eq!(monitor.check_now().await.database, DatabaseStatus::Healthy);
    assert_eq!(probe.calls(), 3);
}

// ---------------------------------------------------------------------------
// Test: start probes immediately; stop is idempotent; restart works
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_runs_first_probe_immediately() {
    let probe = FakeProbe::failing();
    let monitor = test_monitor(probe.clone());
    let mut rx = monitor.subscribe();

    monitor.start().await;
    next_snapshot(&mut rx).await;

    assert_matches!(monitor.current().database, DatabaseStatus::Unhealthy);
    monitor.stop().await;
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn stop_is_idempotent_and_monitor_restarts() {
    let probe = FakeProbe::healthy();
    let monitor = test_monitor(probe.clone());

    // Stopping a monitor that never started is a no-op.
    monitor.stop().await;

    let mut rx = monitor.subscribe();
    monitor.start().await;
    // A second start does not spawn a second task.
    monitor.start().await;
    next_snapshot(&mut rx).await;

    monitor.stop().await;
    monitor.stop().await;
    assert_eq!(probe.calls(), 1);

    monitor.start().await;
    next_snapshot(&mut rx).await;
    monitor.stop().await;
    assert_eq!(probe.calls(), 2);
}

// ---------------------------------------------------------------------------
// Test: the database gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gate_rejects_api_requests_while_unhealthy() {
    let probe = FakeProbe::failing();
    let monitor = test_monitor(probe.clone());
    monitor.check_now().await;

    let app = common::build_app(seeded_store(), monitor.clone());
    let response = get(app, "/api/v1/categories").await;

    let status = response.status();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_error_envelope(&body_json(response).await, status, "SERVICE_UNAVAILABLE");

    // Recovery reopens the gate.
    probe.set_failing(false);
    monitor.check_now().await;
    let app = common::build_app(seeded_store(), monitor);
    assert_eq!(get(app, "/api/v1/categories").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn gate_passes_requests_before_first_probe() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests/r-1").await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: store failures surface as sanitized 500s
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_generic_500() {
    let mut store = seeded_store();
    store.broken = true;
    let app = common::build_app(store, test_monitor(FakeProbe::healthy()));

    let response = get(app, "/api/v1/requests").await;

    let status = response.status();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_error_envelope(&json, status, "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "An internal error occurred");
}
