//! Integration tests for registration, login and the `me` endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_auth, post_json, register_and_login};
use serde_json::json;

#[tokio::test]
async fn register_then_login_issues_bearer_token() {
    let app = build_test_app();

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({ "name": "ada", "password": "analytical-engine" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["user_id"].is_i64());

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "name": "ada", "password": "analytical-engine" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert!(!json["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = build_test_app();
    let body = json!({ "name": "grace", "password": "compiler-1952" });

    let first = post_json(&app, "/api/v1/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(&app, "/api/v1/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[tokio::test]
async fn short_password_fails_validation() {
    let app = build_test_app();
    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({ "name": "linus", "password": "short" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = build_test_app();
    register_and_login(&app, "alan").await;

    let wrong = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "name": "alan", "password": "not-the-password" }),
    )
    .await;
    let unknown = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "name": "nobody", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await, body_json(unknown).await);
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = build_test_app();
    let token = register_and_login(&app, "barbara").await;

    let response = get_auth(&app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "barbara");

    let missing = get(&app, "/api/v1/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let forged = get_auth(&app, "/api/v1/auth/me", "forged.token.value").await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(forged).await["code"], "UNAUTHORIZED");
}
