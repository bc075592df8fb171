//! Refresh token rotation and replay tests against a real PostgreSQL.

mod common;

use http::StatusCode;

use common::{TestApp, session_cookie_pairs};

const PASSWORD: &str = "Str0ng-pass!";

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_rotates_and_replay_fails() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Rotation Clinic").await;
    let original = app
        .signup(clinic_id, "rot@rotation.test", PASSWORD, "doctor")
        .await;

    let refreshed = app
        .request("POST", "/api/auth/refresh", None, &original)
        .await;
    assert_eq!(refreshed.status, StatusCode::OK, "{:?}", refreshed.body);
    let new_refresh = refreshed.cookie("refresh-token").unwrap();
    assert!(!new_refresh.is_empty());
    assert!(
        !original.iter().any(|c| c.ends_with(&new_refresh)),
        "rotation must issue a different refresh token"
    );

    // Replaying the consumed token is rejected.
    let replay = app
        .request("POST", "/api/auth/refresh", None, &original)
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // The rotated token still works.
    let cookies = vec![format!("refresh-token={new_refresh}")];
    let next = app.request("POST", "/api/auth/refresh", None, &cookies).await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_parallel_refresh_exactly_one_winner() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Race Clinic").await;
    let cookies = app
        .signup(clinic_id, "race@race.test", PASSWORD, "nurse")
        .await;

    // Two concurrent refreshes of the same token: the single-statement
    // claim guarantees exactly one of them wins.
    let (a, b) = tokio::join!(
        app.request("POST", "/api/auth/refresh", None, &cookies),
        app.request("POST", "/api/auth/refresh", None, &cookies),
    );

    let statuses = [a.status, b.status];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1,
        "exactly one refresh must win, got {statuses:?}"
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::UNAUTHORIZED)
            .count(),
        1,
        "the loser must be rejected, got {statuses:?}"
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_does_not_append_ledger_entry() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Idle Clinic").await;
    let cookies = app
        .signup(clinic_id, "idle@idle.test", PASSWORD, "doctor")
        .await;

    // An idle client rotating every access-token TTL must not pile up
    // ledger entries; only the signup login is recorded.
    let mut cookies = cookies;
    for _ in 0..3 {
        let refreshed = app.request("POST", "/api/auth/refresh", None, &cookies).await;
        assert_eq!(refreshed.status, StatusCode::OK, "{:?}", refreshed.body);
        cookies = session_cookie_pairs(&refreshed);
    }

    let sessions = app
        .request("GET", "/api/auth/sessions", None, &cookies)
        .await;
    assert_eq!(sessions.status, StatusCode::OK);
    let entries = sessions.body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1, "rotation is not a login");
    assert!(entries[0]["logout_at"].is_null());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_without_cookie_rejected() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/api/auth/refresh", None, &[]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_access_token_rejected_as_refresh_cookie() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("TypeTag Clinic").await;
    let cookies = app
        .signup(clinic_id, "tag@typetag.test", PASSWORD, "doctor")
        .await;

    // Present the access token in the refresh cookie slot.
    let access = cookies
        .iter()
        .find(|c| c.starts_with("access-token="))
        .unwrap()
        .trim_start_matches("access-token=")
        .to_string();
    let forged = vec![format!("refresh-token={access}")];

    let response = app.request("POST", "/api/auth/refresh", None, &forged).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
