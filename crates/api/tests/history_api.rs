//! Integration tests for the `/history` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, build_test_app, delete_auth, get, get_auth, post_json_auth,
    register_and_login, wait_for_history,
};
use serde_json::json;

#[tokio::test]
async fn history_requires_authentication() {
    let app = build_test_app();
    let response = get(&app, "/api/v1/history/dockerfile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_kind_is_a_bad_request() {
    let app = build_test_app();
    let token = register_and_login(&app, "edsger").await;

    let response = get_auth(&app, "/api/v1/history/helm", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn listing_is_newest_first_and_per_kind() {
    let app = build_test_app();
    let token = register_and_login(&app, "donald").await;

    for (recorded, image) in ["alpine:3", "debian:12"].into_iter().enumerate() {
        post_json_auth(
            &app,
            "/api/v1/generate/dockerfile",
            json!({ "baseImage": image }),
            &token,
        )
        .await;
        wait_for_history(&app, "dockerfile", &token, recorded + 1).await;
    }
    post_json_auth(
        &app,
        "/api/v1/generate/compose",
        json!({ "baseImage": "nginx", "service": "web" }),
        &token,
    )
    .await;

    let json = body_json(get_auth(&app, "/api/v1/history/dockerfile", &token).await).await;
    let images: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["spec"]["base_image"].as_str().unwrap())
        .collect();
    assert_eq!(images, vec!["debian:12", "alpine:3"]);

    let json = wait_for_history(&app, "compose", &token, 1).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["kind"], "compose");
}

#[tokio::test]
async fn stored_record_regenerates_the_same_artifact() {
    let app = build_test_app();
    let token = register_and_login(&app, "frances").await;
    let input = json!({
        "baseImage": "python:latest",
        "workDir": "/srv",
        "envVars": "MODE=prod",
        "ports": "8000",
        "startupScript": "python serve.py",
    });

    let original = body_text(
        post_json_auth(&app, "/api/v1/generate/dockerfile", input, &token).await,
    )
    .await;

    let json = wait_for_history(&app, "dockerfile", &token, 1).await;
    let id = json["data"][0]["id"].as_i64().unwrap();

    let response = get_auth(
        &app,
        &format!("/api/v1/history/dockerfile/{id}/artifact"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, original);
}

#[tokio::test]
async fn records_are_private_to_their_owner() {
    let app = build_test_app();
    let owner = register_and_login(&app, "katherine").await;
    let other = register_and_login(&app, "dorothy").await;

    post_json_auth(
        &app,
        "/api/v1/generate/dockerfile",
        json!({ "baseImage": "alpine:3" }),
        &owner,
    )
    .await;
    let json = wait_for_history(&app, "dockerfile", &owner, 1).await;
    let id = json["data"][0]["id"].as_i64().unwrap();

    let listed = body_json(get_auth(&app, "/api/v1/history/dockerfile", &other).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());

    let artifact = get_auth(
        &app,
        &format!("/api/v1/history/dockerfile/{id}/artifact"),
        &other,
    )
    .await;
    assert_eq!(artifact.status(), StatusCode::NOT_FOUND);

    let deleted = delete_auth(&app, &format!("/api/v1/history/dockerfile/{id}"), &other).await;
    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_record_once() {
    let app = build_test_app();
    let token = register_and_login(&app, "hedy").await;

    post_json_auth(
        &app,
        "/api/v1/generate/compose",
        json!({ "baseImage": "redis:7", "service": "cache" }),
        &token,
    )
    .await;
    let json = wait_for_history(&app, "compose", &token, 1).await;
    let id = json["data"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/history/compose/{id}");

    assert_eq!(delete_auth(&app, &uri, &token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(&app, &uri, &token).await.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(&app, "/api/v1/history/compose", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
