//! End-to-end authentication flow tests against a real PostgreSQL.

mod common;

use http::StatusCode;

use common::{TestApp, session_cookie_pairs};

const PASSWORD: &str = "Str0ng-pass!";

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_signup_login_me_flow() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Riverside Family Clinic").await;

    let cookies = app
        .signup(clinic_id, "admin@riverside.test", PASSWORD, "admin")
        .await;
    assert_eq!(cookies.len(), 2, "signup should set both session cookies");

    // Fresh login works too.
    let cookies = app.login("admin@riverside.test", PASSWORD).await;

    let me = app.request("GET", "/api/auth/me", None, &cookies).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["email"], "admin@riverside.test");
    assert_eq!(me.body["data"]["role"], "admin");
    assert!(
        me.body["data"]["permissions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "user.create")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Uniform Clinic").await;
    app.signup(clinic_id, "nurse@uniform.test", PASSWORD, "nurse")
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nurse@uniform.test",
                "password": "Wrong-pass1!"
            })),
            &[],
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@uniform.test",
                "password": PASSWORD
            })),
            &[],
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    // Identical bodies: the response must not reveal which check failed.
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_me_without_cookie_unauthorized() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/auth/me", None, &[]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Dup Clinic").await;
    app.signup(clinic_id, "doc@dup.test", PASSWORD, "doctor")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "clinic_id": clinic_id,
                "email": "DOC@dup.test",
                "password": PASSWORD,
                "first_name": "Second",
                "last_name": "Doctor",
                "role": "doctor",
            })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_signup_weak_password_rejected() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Weak Clinic").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "clinic_id": clinic_id,
                "email": "weak@weak.test",
                "password": "alllowercase",
                "first_name": "Weak",
                "last_name": "Password",
                "role": "patient",
            })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_logout_invalidates_refresh_token() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Logout Clinic").await;
    let cookies = app
        .signup(clinic_id, "out@logout.test", PASSWORD, "patient")
        .await;

    let logout = app.request("POST", "/api/auth/logout", None, &cookies).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.cookie("access-token").as_deref(), Some(""));
    assert_eq!(logout.cookie("refresh-token").as_deref(), Some(""));

    // The stored token row is gone; refresh with the old cookie fails.
    let refresh = app
        .request("POST", "/api/auth/refresh", None, &cookies)
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_logout_is_idempotent() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Idempotent Clinic").await;
    let cookies = app
        .signup(clinic_id, "twice@idem.test", PASSWORD, "patient")
        .await;

    let first = app.request("POST", "/api/auth/logout", None, &cookies).await;
    assert_eq!(first.status, StatusCode::OK);

    // A second logout with the already-consumed token still succeeds and
    // still clears the cookies.
    let second = app.request("POST", "/api/auth/logout", None, &cookies).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.cookie("access-token").as_deref(), Some(""));
    assert_eq!(second.cookie("refresh-token").as_deref(), Some(""));

    // As does a logout with no session at all.
    let bare = app.request("POST", "/api/auth/logout", None, &[]).await;
    assert_eq!(bare.status, StatusCode::OK);
    assert_eq!(bare.cookie("access-token").as_deref(), Some(""));
    assert_eq!(bare.cookie("refresh-token").as_deref(), Some(""));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_deactivated_user_session_revoked() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Deactivation Clinic").await;
    let admin = app
        .signup(clinic_id, "admin@deact.test", PASSWORD, "admin")
        .await;
    let nurse = app
        .signup(clinic_id, "nurse@deact.test", PASSWORD, "nurse")
        .await;

    // The nurse is live right now.
    let me = app.request("GET", "/api/auth/me", None, &nurse).await;
    assert_eq!(me.status, StatusCode::OK);
    let nurse_id = me.body["data"]["id"].as_str().unwrap().to_string();

    let deactivate = app
        .request(
            "PUT",
            &format!("/api/users/{nurse_id}/status"),
            Some(serde_json::json!({ "is_active": false })),
            &admin,
        )
        .await;
    assert_eq!(deactivate.status, StatusCode::OK, "{:?}", deactivate.body);

    // The still-unexpired access token is now rejected on verification.
    let me = app.request("GET", "/api/auth/me", None, &nurse).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    // And the refresh token was revoked with it.
    let refresh = app.request("POST", "/api/auth/refresh", None, &nurse).await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_rbac_forbidden_for_missing_permission() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("RBAC Clinic").await;
    let patient = app
        .signup(clinic_id, "patient@rbac.test", PASSWORD, "patient")
        .await;

    // Patients hold no reports.view permission.
    let stats = app.request("GET", "/api/clinic/stats", None, &patient).await;
    assert_eq!(stats.status, StatusCode::FORBIDDEN);

    // Nor may they list clinic users.
    let users = app.request("GET", "/api/users", None, &patient).await;
    assert_eq!(users.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_session_ledger_records_login_and_logout() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Ledger Clinic").await;
    app.signup(clinic_id, "led@ledger.test", PASSWORD, "doctor")
        .await;
    let cookies = app.login("led@ledger.test", PASSWORD).await;

    let sessions = app
        .request("GET", "/api/auth/sessions", None, &cookies)
        .await;
    assert_eq!(sessions.status, StatusCode::OK);
    let entries = sessions.body["data"].as_array().unwrap();
    // One entry from signup, one from login; newest first and still open.
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["logout_at"].is_null());

    app.request("POST", "/api/auth/logout", None, &cookies).await;

    let cookies = app.login("led@ledger.test", PASSWORD).await;
    let sessions = app
        .request("GET", "/api/auth/sessions", None, &cookies)
        .await;
    let entries = sessions.body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    // The pre-logout entries are closed now.
    assert!(!entries[1]["logout_at"].is_null());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_password_change_revokes_sessions() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Password Clinic").await;
    let cookies = app
        .signup(clinic_id, "pw@pwchange.test", PASSWORD, "doctor")
        .await;

    let change = app
        .request(
            "PUT",
            "/api/users/me/password",
            Some(serde_json::json!({
                "current_password": PASSWORD,
                "new_password": "N3w-Str0ng-pass!"
            })),
            &cookies,
        )
        .await;
    assert_eq!(change.status, StatusCode::OK, "{:?}", change.body);

    // The old refresh token is revoked.
    let refresh = app
        .request("POST", "/api/auth/refresh", None, &cookies)
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);

    // Old password no longer works, new one does.
    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "pw@pwchange.test",
                "password": PASSWORD
            })),
            &[],
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("pw@pwchange.test", "N3w-Str0ng-pass!").await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_change_password_wrong_current_is_bad_request() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Typo Clinic").await;
    let cookies = app
        .signup(clinic_id, "typo@typo.test", PASSWORD, "nurse")
        .await;

    // The caller is already authenticated, so a mistyped current password
    // is a 400 with a usable message, not a login failure.
    let change = app
        .request(
            "PUT",
            "/api/users/me/password",
            Some(serde_json::json!({
                "current_password": "Wrong-pass1!",
                "new_password": "N3w-Str0ng-pass!"
            })),
            &cookies,
        )
        .await;
    assert_eq!(change.status, StatusCode::BAD_REQUEST, "{:?}", change.body);
    assert_eq!(change.body["message"], "Current password is incorrect");

    // The session survives the failed attempt.
    let me = app.request("GET", "/api/auth/me", None, &cookies).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_rank_prevents_acting_upward() {
    let app = TestApp::new().await;
    let clinic_id = app.create_clinic("Rank Clinic").await;
    let admin = app
        .signup(clinic_id, "admin@rank.test", PASSWORD, "admin")
        .await;

    let me = app.request("GET", "/api/auth/me", None, &admin).await;
    let admin_id = me.body["data"]["id"].as_str().unwrap().to_string();

    // Even an admin cannot deactivate themselves.
    let own = app
        .request(
            "PUT",
            &format!("/api/users/{admin_id}/status"),
            Some(serde_json::json!({ "is_active": false })),
            &admin,
        )
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let response = session_cookie_pairs(&me);
    assert!(response.is_empty(), "GET /me must not rotate cookies");
}
