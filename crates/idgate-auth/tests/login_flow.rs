//! End-to-end flow tests against a mocked portal.

use std::sync::Arc;

use idgate_auth::{Account, AuthClientExt, LoginError, SessionState};
use idgate_core::{Client, ClientSettings, PortalTransport, ReqwestTransport};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

// "12345678901234567890" in base32.
const TOTP_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

const USERNAME_PAGE: &str = r#"<html><head>
    <meta name="csrf-token" content="tok-login">
</head><body>
    <p>パスワード再発行用メールアドレスを設定してください</p>
    <div id="identifier-field">
        <input type="text" name="loginId">
        <input type="hidden" name="execution" value="e1s1">
    </div>
    <div id="login-form">
        <input type="text" name="loginId">
        <input type="password" name="loginPassword">
        <input type="hidden" name="execution" value="e1s2">
    </div>
</body></html>"#;

const METHOD_PAGE: &str = r#"<html><head>
    <meta name="csrf-token" content="tok-mfa">
</head><body>
    <p>認証方法を選択してください</p>
    <div id="totp-form">
        <input type="text" name="totp">
        <input type="hidden" name="execution" value="e2s1">
    </div>
    <div id="email-otp-form">
        <input type="text" name="emailOtp">
        <input type="hidden" name="execution" value="e2s2">
    </div>
</body></html>"#;

const WAITING_PAGE: &str = r#"<html><body>
    <p>しばらくお待ちください</p>
    <input type="hidden" name="relayState" value="rs1">
</body></html>"#;

const RESOURCE_PAGE: &str = r#"<html><body>
    <h1>アカウント</h1>
    <ul><li>portal-mail</li><li>portal-files</li></ul>
</body></html>"#;

fn redirect_script(server: &MockServer) -> String {
    format!(
        r#"var d="0";window.location="{}/portal/login/waiting";"#,
        server.uri()
    )
}

fn portal_client(server: &MockServer) -> Client {
    let settings = ClientSettings {
        base_url: server.uri(),
        user_agent: "idgate [TEST]".into(),
    };
    let transport: Arc<dyn PortalTransport> = Arc::new(ReqwestTransport::new(&settings));
    Client::new_with_transport(Some(settings), transport)
}

fn account() -> Account {
    Account::with_totp_secret("u1", "pw1", TOTP_SECRET)
}

/// Mounts the login page, username check and password submission steps.
async fn mount_password_steps(server: &MockServer) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USERNAME_PAGE))
        .mount(server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/identify"))
        .and(matchers::header("X-CSRF-Token", "tok-login"))
        .and(matchers::body_string_contains("loginId=u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "password": true, "identifier": "u1" })),
        )
        .mount(server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/password"))
        .and(matchers::header("X-CSRF-Token", "tok-login"))
        .and(matchers::body_string_contains("loginId=u1"))
        .and(matchers::body_string_contains("loginPassword=pw1"))
        .and(matchers::body_string_contains("execution=e1s2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(redirect_script(server)))
        .mount(server)
        .await;
}

/// Mounts the steps shared by every branch: password steps plus the
/// method-selection page.
async fn mount_first_factor(server: &MockServer) {
    mount_password_steps(server).await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login/mfa"))
        .respond_with(ResponseTemplate::new(200).set_body_string(METHOD_PAGE))
        .mount(server)
        .await;
}

/// Mounts the waiting page and the resource list the redirect chain ends on.
async fn mount_redirect_chain(server: &MockServer) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login/waiting"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WAITING_PAGE))
        .mount(server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/resources"))
        .and(matchers::header(
            "Referer",
            format!("{}/portal/login/waiting", server.uri()).as_str(),
        ))
        .and(matchers::body_string_contains("relayState=rs1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESOURCE_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_totp_login_reaches_the_resource_list() {
    let server = MockServer::start().await;
    mount_first_factor(&server).await;
    mount_redirect_chain(&server).await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/mfa/totp"))
        .and(matchers::header("X-CSRF-Token", "tok-mfa"))
        .and(matchers::body_string_contains("execution=e2s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(redirect_script(&server)))
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(account());

    flow.begin().await.unwrap();
    flow.submit_username().await.unwrap();
    flow.submit_password().await.unwrap();
    assert_eq!(flow.state(), SessionState::MethodSelected);

    let resources = flow.submit_totp().await.unwrap();
    assert!(resources.contains("アカウント"));
    assert_eq!(flow.state(), SessionState::ResourceListReached);
}

#[tokio::test]
async fn test_one_shot_totp_login() {
    let server = MockServer::start().await;
    mount_first_factor(&server).await;
    mount_redirect_chain(&server).await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/mfa/totp"))
        .respond_with(ResponseTemplate::new(200).set_body_string(redirect_script(&server)))
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let resources = auth.login_via_totp(account()).await.unwrap();
    assert!(resources.contains("portal-mail"));
}

#[tokio::test]
async fn test_email_branch_round_trip() {
    let server = MockServer::start().await;
    mount_first_factor(&server).await;
    mount_redirect_chain(&server).await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/mfa/email"))
        .and(matchers::header("X-CSRF-Token", "tok-mfa"))
        .respond_with(ResponseTemplate::new(200).set_body_string("sending succeeded"))
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/mfa/email/verify"))
        .and(matchers::header("X-CSRF-Token", "tok-mfa"))
        .and(matchers::body_string_contains("emailOtp=424242"))
        .and(matchers::body_string_contains("execution=e2s2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(redirect_script(&server)))
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let (mut flow, challenge) = auth.request_email_otp(account()).await.unwrap();
    assert_eq!(flow.state(), SessionState::EmailChallengeIssued);

    // The challenge carries the unfilled OTP form for the caller to complete
    // later.
    assert!(challenge.fields.iter().any(|f| f.name == "emailOtp"));

    let resources = flow.submit_email_otp(challenge, "424242").await.unwrap();
    assert!(resources.contains("アカウント"));
    assert_eq!(flow.state(), SessionState::ResourceListReached);
}

#[tokio::test]
async fn test_already_authenticated_short_circuits() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESOURCE_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    // No other endpoint may be touched.
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/identify"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(0)
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(account());

    let err = flow.begin().await.unwrap_err();
    assert!(matches!(err, LoginError::AlreadyLoggedIn));
    assert_eq!(flow.state(), SessionState::Start);
}

#[tokio::test]
async fn test_username_page_without_its_marker_fails() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>maintenance window</body></html>"),
        )
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(account());

    let err = flow.begin().await.unwrap_err();
    assert!(matches!(err, LoginError::InvalidUsernamePage));
}

#[tokio::test]
async fn test_username_check_mismatch_fails() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USERNAME_PAGE))
        .mount(&server)
        .await;
    // The portal echoes a different identifier than the one submitted.
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/identify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "password": true, "identifier": "u2" })),
        )
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(account());

    flow.begin().await.unwrap();
    let err = flow.submit_username().await.unwrap_err();
    assert!(matches!(err, LoginError::InvalidUsernamePage));
    assert_eq!(flow.state(), SessionState::Start);
}

#[tokio::test]
async fn test_method_page_without_markers_fails() {
    let server = MockServer::start().await;
    mount_password_steps(&server).await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login/mfa"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>unexpected</body></html>"),
        )
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(account());

    flow.begin().await.unwrap();
    flow.submit_username().await.unwrap();
    let err = flow.submit_password().await.unwrap_err();
    assert!(matches!(err, LoginError::InvalidMethodSelectionPage));
    // No method choice was consumed.
    assert_eq!(flow.state(), SessionState::PasswordEntered);
}

#[tokio::test]
async fn test_missing_totp_secret_fails_before_any_submission() {
    let server = MockServer::start().await;
    mount_first_factor(&server).await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/mfa/totp"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(0)
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(Account::new("u1", "pw1"));

    flow.begin().await.unwrap();
    flow.submit_username().await.unwrap();
    flow.submit_password().await.unwrap();

    let err = flow.submit_totp().await.unwrap_err();
    assert!(matches!(err, LoginError::MissingTotpSecret));
}

#[tokio::test]
async fn test_email_dispatch_failure() {
    let server = MockServer::start().await;
    mount_first_factor(&server).await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/mfa/email"))
        .respond_with(ResponseTemplate::new(200).set_body_string("sending failed"))
        .mount(&server)
        .await;

    let auth = portal_client(&server).auth();
    let err = auth.request_email_otp(account()).await.unwrap_err();
    assert!(matches!(err, LoginError::InvalidEmailSending));
}

#[tokio::test]
async fn test_probe_credentials_outcomes() {
    let server = MockServer::start().await;
    mount_first_factor(&server).await;

    let auth = portal_client(&server).auth();
    assert!(auth.probe_credentials(account()).await.unwrap());

    // Same steps, but the portal answers the password submission with an
    // error page instead of a redirect script.
    let rejecting = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/portal/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USERNAME_PAGE))
        .mount(&rejecting)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/identify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "password": true, "identifier": "u1" })),
        )
        .mount(&rejecting)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/portal/login/password"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>wrong password</body></html>"),
        )
        .mount(&rejecting)
        .await;

    let auth = portal_client(&rejecting).auth();
    assert!(!auth.probe_credentials(account()).await.unwrap());
}

#[tokio::test]
async fn test_out_of_order_operations_fail_without_network() {
    let server = MockServer::start().await;
    // Nothing mounted: any request would fail the test through a transport
    // error instead of InvalidState.

    let auth = portal_client(&server).auth();
    let mut flow = auth.login_flow(account());

    let err = flow.submit_password().await.unwrap_err();
    assert!(matches!(
        err,
        LoginError::InvalidState {
            operation: "submit_password",
            ..
        }
    ));

    let err = flow.submit_username().await.unwrap_err();
    assert!(matches!(
        err,
        LoginError::InvalidState {
            operation: "submit_username",
            ..
        }
    ));
}
