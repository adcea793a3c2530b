//! Behavior-driven tests for session authentication.
//!
//! These tests verify HOW a session moves from unauthenticated to
//! authenticated, and that nothing is sent while it has no token.

use std::sync::Arc;

use gfolio_core::{
    Credentials, FinanceError, GfolioConfig, HttpError, HttpMethod, HttpResponse,
    ScriptedHttpClient, Session,
};

fn session_with(client: &Arc<ScriptedHttpClient>) -> Session {
    let config =
        GfolioConfig::default().with_portfolios_url("https://feeds.example.test/portfolios");
    let credentials = Credentials::from_config("investor@example.test", "pa55", &config);
    Session::new(credentials, config, client.clone())
}

// =============================================================================
// Session: Login
// =============================================================================

#[tokio::test]
async fn when_login_succeeds_later_requests_carry_the_token() {
    // Given: An auth endpoint that accepts the credentials
    let client = ScriptedHttpClient::new()
        .with_response(HttpResponse::ok("SID=sid\nLSID=lsid\nAuth=DQAAAHkA\n"))
        .with_response(HttpResponse::ok(r#"{"feed": {}}"#))
        .into_shared();
    let mut session = session_with(&client);

    // When: The session logs in and lists portfolios
    session.login().await.expect("login should succeed");
    session.list_portfolios().await.expect("empty feed is fine");

    // Then: The feed request is authorized and versioned
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, "https://www.google.com/accounts/ClientLogin");
    assert_eq!(
        requests[1].header("authorization"),
        Some("GoogleLogin auth=DQAAAHkA")
    );
    assert_eq!(requests[1].header("gdata-version"), Some("2"));
    assert_eq!(
        requests[1].url,
        "https://feeds.example.test/portfolios?alt=json"
    );
}

#[tokio::test]
async fn when_credentials_are_rejected_session_stays_unauthenticated() {
    // Given: An auth endpoint answering 403
    let client = ScriptedHttpClient::new()
        .with_response(HttpResponse::new(403, "Error=BadAuthentication\n"))
        .into_shared();
    let mut session = session_with(&client);

    // When: The session logs in
    let error = session.login().await.expect_err("login should fail");

    // Then: No token is stored and the failure is classified
    assert!(matches!(error, FinanceError::AuthenticationFailed { .. }));
    assert!(!session.is_authenticated());
    assert_eq!(error.code(), "auth.failed");
}

#[tokio::test]
async fn when_auth_endpoint_is_unreachable_user_receives_network_error() {
    let client = ScriptedHttpClient::new()
        .with_failure(HttpError::unreachable("connection refused"))
        .into_shared();
    let mut session = session_with(&client);

    let error = session.login().await.expect_err("login should fail");

    assert!(matches!(error, FinanceError::Network(_)));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn when_relogin_fails_previous_token_is_dropped() {
    let client = ScriptedHttpClient::new()
        .with_response(HttpResponse::ok("SID=a\nLSID=b\nAuth=first\n"))
        .with_response(HttpResponse::new(500, ""))
        .into_shared();
    let mut session = session_with(&client);

    session.login().await.expect("first login succeeds");
    assert!(session.is_authenticated());

    session.login().await.expect_err("second login fails");
    assert!(!session.is_authenticated());
    assert!(!session.headers().contains_key("authorization"));
}

// =============================================================================
// Session: Operations Before Login
// =============================================================================

#[tokio::test]
async fn when_not_logged_in_portfolio_operations_send_nothing() {
    // Given: A fresh session
    let client = ScriptedHttpClient::new().into_shared();
    let mut session = session_with(&client);

    // When: Authenticated operations are attempted
    let listed = session.list_portfolios().await;
    let created = session.create_portfolio("Growth", "USD").await;

    // Then: Each reports NotAuthenticated and no request leaves the process
    assert!(matches!(listed, Err(FinanceError::NotAuthenticated)));
    assert!(matches!(created, Err(FinanceError::NotAuthenticated)));
    assert!(client.recorded_requests().is_empty());
}
