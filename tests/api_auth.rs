use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use hello_jwt::app::build_router;
use hello_jwt::config::HttpLimits;
use hello_jwt::services::auth::{AuthenticatedPrincipal, SigningKey, TokenProvider};
use hello_jwt::state::AppState;

const VALIDITY_SECONDS: u64 = 3600;

struct TestApp {
    router: Router,
    tokens: Arc<TokenProvider>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_limits(HttpLimits::default())
    }

    fn with_limits(limits: HttpLimits) -> Self {
        let key = SigningKey::from_bytes(&[0x5A; 64]).expect("valid key");
        let tokens = Arc::new(TokenProvider::new(key, VALIDITY_SECONDS));
        let router = build_router(AppState::new(tokens.clone()), &limits);
        Self { router, tokens }
    }

    fn token_for(&self, name: &str, roles: &[&str]) -> String {
        self.tokens
            .create_token(
                &AuthenticatedPrincipal::new(name, roles.iter().copied()),
                Utc::now(),
            )
            .expect("sign token")
    }

    async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut req = Request::builder().uri(path);
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        let req = req.body(Body::empty()).expect("request");

        let res = self.router.clone().oneshot(req).await.expect("infallible");
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, headers, body)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn unauthorized_body() -> Value {
    json!({"error": {"code": "UNAUTHORIZED", "message": "unauthorized"}})
}

#[tokio::test]
async fn hello_is_public() {
    let app = TestApp::new();
    let (status, _, body) = app.get("/api/hello", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("hello".into()));
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, _, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn invalid_token_does_not_break_public_routes() {
    let app = TestApp::new();
    let (status, _, _) = app.get("/api/hello", Some("Bearer garbage")).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let app = TestApp::new();
    let (status, headers, body) = app.get("/api/user", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn tampered_token_is_unauthorized_not_a_fault() {
    let app = TestApp::new();
    let token = app.token_for("alice", &["ROLE_USER"]);

    let mut tampered = token.into_bytes();
    let last = tampered.len() - 2;
    tampered[last] = if tampered[last] == b'x' { b'y' } else { b'x' };
    let tampered = String::from_utf8(tampered).expect("ascii");

    let (status, _, body) = app.get("/api/user", Some(&bearer(&tampered))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn expired_token_gets_generic_401() {
    let app = TestApp::new();
    let issued = Utc::now() - Duration::seconds(VALIDITY_SECONDS as i64 + 1);
    let token = app
        .tokens
        .create_token(&AuthenticatedPrincipal::new("alice", ["ROLE_USER"]), issued)
        .expect("sign token");

    let (status, _, body) = app.get("/api/user", Some(&bearer(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // no hint that the token was expired rather than forged
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn scheme_prefix_is_case_sensitive() {
    let app = TestApp::new();
    let token = app.token_for("alice", &["ROLE_USER"]);

    let (status, _, _) = app.get("/api/user", Some(&format!("bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn alice_end_to_end() {
    let app = TestApp::new();
    let token = app.token_for("alice", &["ROLE_USER"]);
    assert!(app.tokens.is_valid(&token));

    let (status, _, body) = app.get("/api/user", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "alice", "roles": ["ROLE_USER"]}));

    let (status, _, body) = app.get("/api/user/bob", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({"error": {"code": "FORBIDDEN", "message": "forbidden"}})
    );
}

#[tokio::test]
async fn admin_can_look_up_users() {
    let app = TestApp::new();
    let token = app.token_for("root", &["ROLE_ADMIN"]);

    let (status, _, body) = app.get("/api/user/bob", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "bob", "requested_by": "root"}));

    // ROLE_ADMIN alone also satisfies the "user or admin" rule
    let (status, _, body) = app.get("/api/user", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!(["ROLE_ADMIN"]));
}

#[tokio::test]
async fn token_without_roles_is_forbidden() {
    let app = TestApp::new();
    let token = app.token_for("nobody", &[]);

    let (status, _, _) = app.get("/api/user", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_from_another_key_is_rejected() {
    let app = TestApp::new();
    let other = TokenProvider::new(
        SigningKey::from_bytes(&[0x11; 64]).expect("valid key"),
        VALIDITY_SECONDS,
    );
    let token = other
        .create_token(&AuthenticatedPrincipal::new("mallory", ["ROLE_ADMIN"]), Utc::now())
        .expect("sign token");

    let (status, _, _) = app.get("/api/user/bob", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn context_does_not_leak_between_requests() {
    let app = TestApp::new();
    let token = app.token_for("alice", &["ROLE_USER"]);

    let (status, _, _) = app.get("/api/user", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app.get("/api/user", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_path_requires_authentication() {
    let app = TestApp::new();
    let (status, _, _) = app.get("/api/nope", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.token_for("alice", &["ROLE_USER"]);
    let (status, _, body) = app.get("/api/nope", Some(&bearer(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn responses_carry_security_and_request_id_headers() {
    let app = TestApp::new();
    let (_, headers, _) = app.get("/api/user", None).await;

    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn oversized_body_is_refused_before_routing() {
    let app = TestApp::with_limits(HttpLimits {
        body_limit_bytes: 16,
        ..HttpLimits::default()
    });
    let token = app.token_for("alice", &["ROLE_USER"]);
    let body = vec![b'a'; 64];

    let req = Request::builder()
        .method("POST")
        .uri("/api/user")
        .header(header::AUTHORIZATION, bearer(&token))
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .expect("request");
    let res = app.router.clone().oneshot(req).await.expect("infallible");

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
