use super::*;
use crate::api::transport::tests::{MockContext, MockTransport};
use crate::web::storage::tests::MemoryTokens;
use std::rc::Rc;

// =========================================================
// Helpers
// =========================================================

fn setup(
    access: Option<&str>,
    refresh: Option<&str>,
) -> (Rc<MockContext>, ApiGateway<MockTransport, MemoryTokens>) {
    let ctx = MockContext::new();
    let gateway = ApiGateway::new(
        MockTransport::new(ctx.clone()),
        MemoryTokens::with_tokens(access, refresh),
        "http://api.test",
    );
    (ctx, gateway)
}

fn user(role: UserRole) -> User {
    User {
        id: "u1".to_string(),
        email: "owner@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        role,
        phone_number: None,
        company_name: None,
        business_type: None,
        subscription: Some(SubscriptionPlan::Free),
        subscription_expiry: None,
        created_at: String::new(),
        status: None,
    }
}

fn registration() -> ClientRegistration {
    ClientRegistration {
        company_name: "Acme".to_string(),
        username: "acme_portal".to_string(),
        password: "hunter2hunter2".to_string(),
        confirm_password: "hunter2hunter2".to_string(),
    }
}

// =========================================================
// Login / logout
// =========================================================

#[tokio::test]
async fn login_persists_the_token_pair() {
    let (ctx, gateway) = setup(None, None);
    ctx.push_response(
        200,
        r#"{
            "success": true, "token": "acc-1", "refresh": "ref-1",
            "user": {"id":"1","email":"kay@example.com","role":"core_user"}
        }"#,
    );

    let flow = SessionFlow::new(&gateway);
    let user = flow.login("kay@example.com", "hunter2").await.unwrap();
    assert_eq!(user.role, UserRole::CoreUser);

    assert_eq!(gateway.tokens().access_token().as_deref(), Some("acc-1"));
    assert_eq!(gateway.tokens().refresh_token().as_deref(), Some("ref-1"));

    let request = ctx.request(0);
    assert_eq!(request.url, "http://api.test/api/auth/login/");
    assert_eq!(request.bearer, None);
    assert!(request.body.unwrap().contains("kay@example.com"));
}

#[tokio::test]
async fn failed_login_persists_nothing() {
    let (ctx, gateway) = setup(None, None);
    ctx.push_response(401, r#"{"message":"Invalid credentials"}"#);

    let flow = SessionFlow::new(&gateway);
    let err = flow.login("kay@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.message(), "Invalid credentials");
    assert_eq!(ctx.request_count(), 1);
    assert_eq!(gateway.tokens().access_token(), None);
}

#[tokio::test]
async fn logout_blacklists_refresh_then_clears() {
    let (ctx, gateway) = setup(Some("acc-1"), Some("ref-1"));
    ctx.push_response(200, r#"{"success":true}"#);

    SessionFlow::new(&gateway).logout().await;

    let request = ctx.request(0);
    assert_eq!(request.url, "http://api.test/api/auth/logout/");
    assert!(request.body.unwrap().contains("ref-1"));
    assert_eq!(gateway.tokens().access_token(), None);
    assert_eq!(gateway.tokens().refresh_token(), None);
}

#[tokio::test]
async fn logout_clears_even_when_server_fails() {
    let (ctx, gateway) = setup(Some("acc-1"), Some("ref-1"));
    ctx.push_response(500, "");

    SessionFlow::new(&gateway).logout().await;
    assert_eq!(ctx.request_count(), 1);
    assert_eq!(gateway.tokens().access_token(), None);
    assert_eq!(gateway.tokens().refresh_token(), None);
}

#[tokio::test]
async fn logout_without_refresh_token_skips_the_network() {
    let (ctx, gateway) = setup(Some("acc-1"), None);

    SessionFlow::new(&gateway).logout().await;
    assert_eq!(ctx.request_count(), 0);
    assert_eq!(gateway.tokens().access_token(), None);
}

// =========================================================
// Restore
// =========================================================

#[tokio::test]
async fn restore_resolves_the_stored_session() {
    let (ctx, gateway) = setup(Some("acc-1"), Some("ref-1"));
    ctx.push_response(200, r#"{"id":"1","email":"kay@example.com","role":"admin"}"#);

    let restored = SessionFlow::new(&gateway).restore().await.unwrap();
    assert_eq!(restored.role, UserRole::Admin);
    assert_eq!(ctx.request(0).url, "http://api.test/api/auth/user/");
    assert_eq!(ctx.request(0).bearer.as_deref(), Some("acc-1"));
}

#[tokio::test]
async fn restore_without_token_skips_the_network() {
    let (ctx, gateway) = setup(None, Some("ref-1"));

    assert!(SessionFlow::new(&gateway).restore().await.is_none());
    assert_eq!(ctx.request_count(), 0);
}

#[tokio::test]
async fn restore_clears_tokens_when_the_server_rejects_them() {
    let (ctx, gateway) = setup(Some("stale"), Some("dead"));
    // /user/ fails, the gateway's refresh attempt fails too
    ctx.push_response(401, r#"{"detail":"token expired"}"#);
    ctx.push_response(401, r#"{"detail":"refresh expired"}"#);

    assert!(SessionFlow::new(&gateway).restore().await.is_none());
    assert_eq!(ctx.request_count(), 2);
    assert_eq!(gateway.tokens().access_token(), None);
    assert_eq!(gateway.tokens().refresh_token(), None);
}

// =========================================================
// Registration
// =========================================================

#[tokio::test]
async fn register_posts_the_snake_case_profile() {
    let (ctx, gateway) = setup(None, None);
    ctx.push_response(201, r#"{"success":true}"#);

    let registration = CoreUserRegistration {
        email: "kay@example.com".to_string(),
        password: "hunter2hunter2".to_string(),
        first_name: "Kay".to_string(),
        last_name: "Chen".to_string(),
        phone_number: "555-0101".to_string(),
        company_name: "Chen Analytics".to_string(),
        business_type: "Consulting".to_string(),
    };
    SessionFlow::new(&gateway)
        .register(&registration)
        .await
        .unwrap();

    let request = ctx.request(0);
    assert_eq!(request.url, "http://api.test/api/auth/register/");
    let wire = request.body.unwrap();
    assert!(wire.contains("\"first_name\":\"Kay\""));
    assert!(wire.contains("\"business_type\":\"Consulting\""));
}

// =========================================================
// Client creation
// =========================================================

#[tokio::test]
async fn create_client_requires_a_session() {
    let (ctx, gateway) = setup(None, None);

    let err = SessionFlow::new(&gateway)
        .create_client(None, &registration())
        .await
        .unwrap_err();
    assert_eq!(err, SessionError::NotAuthenticated);
    assert_eq!(ctx.request_count(), 0);
}

#[tokio::test]
async fn client_role_cannot_create_clients() {
    let (ctx, gateway) = setup(Some("acc-1"), None);

    let err = SessionFlow::new(&gateway)
        .create_client(Some(&user(UserRole::Client)), &registration())
        .await
        .unwrap_err();
    assert_eq!(err, SessionError::Forbidden);
    assert_eq!(ctx.request_count(), 0);
}

#[tokio::test]
async fn password_mismatch_never_reaches_the_wire() {
    let (ctx, gateway) = setup(Some("acc-1"), None);

    let mut bad = registration();
    bad.confirm_password = "different0000".to_string();
    let err = SessionFlow::new(&gateway)
        .create_client(Some(&user(UserRole::CoreUser)), &bad)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::Validation("Passwords do not match".to_string())
    );
    assert_eq!(ctx.request_count(), 0);
}

#[tokio::test]
async fn create_client_posts_the_wire_body() {
    let (ctx, gateway) = setup(Some("acc-1"), None);
    ctx.push_response(
        201,
        r#"{"id":"c1","company_name":"Acme","username":"acme_portal"}"#,
    );

    let created = SessionFlow::new(&gateway)
        .create_client(Some(&user(UserRole::CoreUser)), &registration())
        .await
        .unwrap();
    assert_eq!(created.id, "c1");

    let wire = ctx.request(0).body.unwrap();
    assert!(wire.contains("\"company_name\":\"Acme\""));
    assert!(wire.contains("\"password\":\"hunter2hunter2\""));
    // confirm_password is a form-only field
    assert!(!wire.contains("confirm_password"));
}

#[tokio::test]
async fn create_client_surfaces_server_rejection() {
    let (ctx, gateway) = setup(Some("acc-1"), None);
    ctx.push_response(400, r#"{"message":"username taken"}"#);

    let err = SessionFlow::new(&gateway)
        .create_client(Some(&user(UserRole::Admin)), &registration())
        .await
        .unwrap_err();
    assert_eq!(err, SessionError::CreateFailed);
}

// =========================================================
// Subscription upgrade
// =========================================================

#[tokio::test]
async fn upgrade_is_core_user_only() {
    let (ctx, gateway) = setup(Some("acc-1"), None);

    let flow = SessionFlow::new(&gateway);
    let admin = flow
        .upgrade_subscription(Some(&user(UserRole::Admin)), SubscriptionPlan::Professional)
        .await
        .unwrap_err();
    let client = flow
        .upgrade_subscription(Some(&user(UserRole::Client)), SubscriptionPlan::Professional)
        .await
        .unwrap_err();
    assert_eq!(admin, SessionError::Forbidden);
    assert_eq!(client, SessionError::Forbidden);
    assert_eq!(ctx.request_count(), 0);
}

#[tokio::test]
async fn upgrade_returns_the_new_subscription() {
    let (ctx, gateway) = setup(Some("acc-1"), None);
    ctx.push_response(
        200,
        r#"{"success":true,"subscription":"professional","subscription_expiry":"2026-12-31"}"#,
    );

    let update = SessionFlow::new(&gateway)
        .upgrade_subscription(
            Some(&user(UserRole::CoreUser)),
            SubscriptionPlan::Professional,
        )
        .await
        .unwrap();
    assert_eq!(update.plan, SubscriptionPlan::Professional);
    assert_eq!(update.expiry.as_deref(), Some("2026-12-31"));

    let request = ctx.request(0);
    assert_eq!(
        request.url,
        "http://api.test/api/auth/upgrade-subscription/"
    );
    assert!(request.body.unwrap().contains("\"plan\":\"professional\""));
}

#[tokio::test]
async fn upgrade_falls_back_to_the_requested_plan() {
    let (ctx, gateway) = setup(Some("acc-1"), None);
    ctx.push_response(200, r#"{"success":true}"#);

    let update = SessionFlow::new(&gateway)
        .upgrade_subscription(
            Some(&user(UserRole::CoreUser)),
            SubscriptionPlan::Enterprise,
        )
        .await
        .unwrap();
    assert_eq!(update.plan, SubscriptionPlan::Enterprise);
    assert_eq!(update.expiry, None);
}
