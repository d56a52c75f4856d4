use super::*;
use crate::api::error::ApiErrorKind;
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

#[derive(serde::Deserialize)]
struct Echo {
    ok: bool,
}

// =========================================================
// Request interceptor
// =========================================================

#[tokio::test]
async fn attaches_bearer_when_token_present() {
    let (ctx, gateway) = setup(Some("tok-1"), None);
    ctx.push_response(200, r#"{"ok":true}"#);

    let echo: Echo = gateway.get_json("/api/auth/users/").await.unwrap();
    assert!(echo.ok);

    let request = ctx.request(0);
    assert_eq!(request.bearer.as_deref(), Some("tok-1"));
    assert_eq!(request.url, "http://api.test/api/auth/users/");
    assert_eq!(request.method, HttpMethod::Get);
}

#[tokio::test]
async fn anonymous_requests_carry_no_bearer() {
    let (ctx, gateway) = setup(None, None);
    ctx.push_response(200, r#"{"ok":true}"#);

    let _: Echo = gateway.get_json("/api/clients/").await.unwrap();
    assert_eq!(ctx.request(0).bearer, None);
}

#[tokio::test]
async fn base_url_trailing_slash_is_normalized() {
    let ctx = MockContext::new();
    let gateway = ApiGateway::new(
        MockTransport::new(ctx.clone()),
        MemoryTokens::new(),
        "http://api.test/",
    );
    ctx.push_response(200, r#"{"ok":true}"#);

    let _: Echo = gateway.get_json("/api/clients/").await.unwrap();
    assert_eq!(ctx.request(0).url, "http://api.test/api/clients/");
}

// =========================================================
// Response interceptor: refresh & replay
// =========================================================

#[tokio::test]
async fn refresh_then_replay_exactly_once() {
    let (ctx, gateway) = setup(Some("stale"), Some("ref-1"));
    ctx.push_response(401, r#"{"detail":"token expired"}"#);
    ctx.push_response(200, r#"{"access":"fresh"}"#);
    ctx.push_response(200, r#"{"ok":true}"#);

    let echo: Echo = gateway.get_json("/api/reports/").await.unwrap();
    assert!(echo.ok);
    assert_eq!(ctx.request_count(), 3);

    // Original request with the stale token
    assert_eq!(ctx.request(0).bearer.as_deref(), Some("stale"));

    // Refresh call is anonymous and hits the refresh endpoint
    let refresh = ctx.request(1);
    assert_eq!(refresh.url, "http://api.test/api/auth/token/refresh/");
    assert_eq!(refresh.bearer, None);
    assert!(refresh.body.as_deref().unwrap().contains("ref-1"));

    // Replay carries the new token and the new token is persisted
    assert_eq!(ctx.request(2).bearer.as_deref(), Some("fresh"));
    assert_eq!(gateway.tokens().access_token().as_deref(), Some("fresh"));
    assert_eq!(gateway.tokens().refresh_token().as_deref(), Some("ref-1"));
}

#[tokio::test]
async fn replay_keeps_method_and_body() {
    let (ctx, gateway) = setup(Some("stale"), Some("ref-1"));
    ctx.push_response(401, "{}");
    ctx.push_response(200, r#"{"access":"fresh"}"#);
    ctx.push_response(200, r#"{"ok":true}"#);

    let body = serde_json::json!({"company_name": "Acme"});
    let _: Echo = gateway.post_json("/api/clients/", &body).await.unwrap();

    let original = ctx.request(0);
    let replay = ctx.request(2);
    assert_eq!(replay.method, HttpMethod::Post);
    assert_eq!(replay.url, original.url);
    assert_eq!(replay.body, original.body);
}

#[tokio::test]
async fn failed_refresh_clears_tokens_and_propagates_original() {
    let (ctx, gateway) = setup(Some("stale"), Some("ref-1"));
    ctx.push_response(401, r#"{"detail":"token expired"}"#);
    ctx.push_response(401, r#"{"detail":"refresh expired"}"#);

    let err = gateway.get_json::<Echo>("/api/reports/").await.unwrap_err();
    assert!(err.is_unauthorized());
    // Original body message, not the refresh endpoint's
    assert_eq!(err.message, "token expired");
    assert_eq!(ctx.request_count(), 2);

    assert_eq!(gateway.tokens().access_token(), None);
    assert_eq!(gateway.tokens().refresh_token(), None);
}

#[tokio::test]
async fn replayed_401_is_not_refreshed_again() {
    let (ctx, gateway) = setup(Some("stale"), Some("ref-1"));
    ctx.push_response(401, "{}");
    ctx.push_response(200, r#"{"access":"fresh"}"#);
    ctx.push_response(401, r#"{"detail":"still denied"}"#);

    let err = gateway.get_json::<Echo>("/api/reports/").await.unwrap_err();
    assert!(err.is_unauthorized());
    // Exactly three wire calls: original, refresh, replay
    assert_eq!(ctx.request_count(), 3);
    // The successful refresh result stays persisted
    assert_eq!(gateway.tokens().access_token().as_deref(), Some("fresh"));
    assert_eq!(gateway.tokens().refresh_token().as_deref(), Some("ref-1"));
}

#[tokio::test]
async fn missing_refresh_token_propagates_401_untouched() {
    let (ctx, gateway) = setup(Some("stale"), None);
    ctx.push_response(401, r#"{"detail":"token expired"}"#);

    let err = gateway.get_json::<Echo>("/api/reports/").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(ctx.request_count(), 1);
    // No refresh attempt, so nothing is cleared
    assert_eq!(gateway.tokens().access_token().as_deref(), Some("stale"));
}

#[tokio::test]
async fn refresh_transport_error_counts_as_failure() {
    let (ctx, gateway) = setup(Some("stale"), Some("ref-1"));
    ctx.push_response(401, "{}");
    ctx.push_error(ApiError::network("connection reset"));

    let err = gateway.get_json::<Echo>("/api/reports/").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(gateway.tokens().access_token(), None);
    assert_eq!(gateway.tokens().refresh_token(), None);
}

// =========================================================
// Decoding
// =========================================================

#[tokio::test]
async fn non_401_errors_pass_through() {
    let (ctx, gateway) = setup(Some("tok-1"), Some("ref-1"));
    ctx.push_response(500, r#"{"message":"boom"}"#);

    let err = gateway.get_json::<Echo>("/api/clients/").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.message, "boom");
    assert_eq!(ctx.request_count(), 1);
}

#[tokio::test]
async fn error_without_body_gets_generic_message() {
    let (ctx, gateway) = setup(None, None);
    ctx.push_response(502, "");

    let err = gateway.get_json::<Echo>("/api/clients/").await.unwrap_err();
    assert_eq!(err.message, "request failed with status 502");
}

#[tokio::test]
async fn invalid_json_is_a_serialization_error() {
    let (ctx, gateway) = setup(None, None);
    ctx.push_response(200, "<html>not json</html>");

    let err = gateway.get_json::<Echo>("/api/clients/").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Serialization);
}

#[tokio::test]
async fn delete_succeeds_on_empty_204() {
    let (ctx, gateway) = setup(Some("tok-1"), None);
    ctx.push_response(204, "");

    gateway.delete("/api/clients/c1/").await.unwrap();
    assert_eq!(ctx.request(0).method, HttpMethod::Delete);
}
