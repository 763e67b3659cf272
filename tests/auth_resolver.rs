mod common;

use axum::http::StatusCode;
use common::{TestApp, error_message};

#[tokio::test]
async fn missing_authorization_header_is_invalid_token() {
    let app = TestApp::spawn().await;

    let (status, body) = app.request("GET", "/api/v1/user", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid Token");
}

#[tokio::test]
async fn non_bearer_scheme_is_invalid_token() {
    let app = TestApp::spawn().await;

    for raw in ["Token abc", "bearer abc", "Bearer", "abc"] {
        let (status, body) = app.request_with_raw_auth("GET", "/api/v1/user", raw).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "accepted header {raw:?}");
        assert_eq!(error_message(&body), "Invalid Token");
    }
}

#[tokio::test]
async fn provider_rejected_token_is_user_unauthorized() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "some-user").await;

    let (status, body) = app
        .request("GET", "/api/v1/user", Some("made-up-token"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "User is unauthorized");
}

#[tokio::test]
async fn verified_token_without_local_credential_is_generic_unauthorized() {
    let app = TestApp::spawn().await;
    // The provider knows the token, but nothing was ever registered here.
    app.identity.issue_token("uid-foreign", "foreign-token");

    let (status, body) = app
        .request("GET", "/api/v1/user", Some("foreign-token"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Unauthorized");
}

#[tokio::test]
async fn valid_token_resolves_the_matching_credential() {
    let app = TestApp::spawn().await;
    let token = app.register_and_issue_token("a@x.com", "some-user").await;

    let (status, body) = app
        .request("GET", "/api/v1/user", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emailAddress"], "a@x.com");
    assert_eq!(
        body["firebaseId"].as_str().unwrap(),
        app.identity.last_created_uid().unwrap()
    );
    assert_eq!(body["account"]["username"], "some-user");
}
