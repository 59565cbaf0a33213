use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Extension, Json, Router,
};
use tower::ServiceExt;

use shared_config::AppConfig;
use shared_models::auth::{AuthUser, Role};
use shared_utils::guard::{with_policy, RoutePolicy};
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

async fn whoami(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}

fn test_router(config: Arc<AppConfig>) -> Router {
    let public = with_policy(
        Router::new().route("/ping", get(|| async { "ok" })),
        RoutePolicy::public(),
        config.clone(),
    );

    let admin = with_policy(
        Router::new().route("/admin/users", get(whoami)),
        RoutePolicy::allow(&[Role::Admin]),
        config.clone(),
    );

    let exempt = with_policy(
        Router::new().route("/profile", get(whoami)),
        RoutePolicy::authenticated().with_skip_permission(),
        config.clone(),
    );

    Router::new().merge(public).merge(admin).merge(exempt)
}

fn request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn public_route_needs_no_token() {
    let config = TestConfig::default().to_arc();
    let app = test_router(config);

    let response = app.oneshot(request("/ping", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let config = TestConfig::default().to_arc();
    let app = test_router(config);

    let response = app.oneshot(request("/admin/users", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_invalid_signature() {
    let config = TestConfig::default().to_arc();
    let app = test_router(config);

    let user = TestUser::admin("0900000009");
    let token = JwtTestUtils::create_invalid_signature_token(&user);

    let response = app
        .oneshot(request("/admin/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_route_accepts_admin() {
    let test_config = TestConfig::default();
    let app = test_router(test_config.to_arc());

    let user = TestUser::admin("0900000009");
    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(24));

    let response = app
        .oneshot(request("/admin/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["id"], user.id);
}

#[tokio::test]
async fn admin_route_rejects_patient_role() {
    let test_config = TestConfig::default();
    let app = test_router(test_config.to_arc());

    let user = TestUser::patient("0900000010");
    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(24));

    let response = app
        .oneshot(request("/admin/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn skip_permission_still_requires_authentication() {
    let test_config = TestConfig::default();
    let app = test_router(test_config.to_arc());

    // No token: rejected.
    let response = app.clone().oneshot(request("/profile", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Any valid role passes once authenticated.
    let user = TestUser::patient("0900000011");
    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(24));
    let response = app.oneshot(request("/profile", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let test_config = TestConfig::default();
    let app = test_router(test_config.to_arc());

    let user = TestUser::admin("0900000012");
    let token = JwtTestUtils::create_expired_token(&user, &test_config.jwt_secret);

    let response = app
        .oneshot(request("/admin/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
