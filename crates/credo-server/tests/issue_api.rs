//! Integration tests for the issuer API

use axum::{body::Body, http::{Request, StatusCode}};
use serde_json::json;

mod common;
use common::{get, post_json, send, TestApp, ISSUER_DID};

#[tokio::test]
async fn test_issuer_health() {
    let app = TestApp::new();
    let (status, json) = send(app.issuer(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "ok", "role": "issuer"}));
}

#[tokio::test]
async fn test_issue_returns_token() {
    let app = TestApp::new();
    let (status, json) = send(
        app.issuer(),
        post_json(
            "/issue",
            &json!({
                "name": "Jane Doe",
                "opleiding": "Informatica",
                "afstudeerdatum": "2024-06-01"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = json["vcJwt"].as_str().expect("vcJwt should be a string");
    assert_eq!(token.split('.').count(), 3);
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_issue_rejects_missing_fields() {
    let app = TestApp::new();

    for body in [
        json!({"name": "", "opleiding": "Informatica", "afstudeerdatum": "2024-06-01"}),
        json!({"name": "Jane Doe", "afstudeerdatum": "2024-06-01"}),
        json!({"name": "Jane Doe", "opleiding": "Informatica"}),
        json!({}),
    ] {
        let (status, json) = send(app.issuer(), post_json("/issue", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert!(json["error"].as_str().unwrap().contains("required"));
    }
}

#[tokio::test]
async fn test_issue_rejects_unreadable_body() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/issue")
        .header("Content-Type", "application/json")
        .body(Body::from("{ nope"))
        .unwrap();

    let (status, json) = send(app.issuer(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_issuer_has_no_verify_route() {
    let app = TestApp::new();
    let token = app
        .issue_token(json!({
            "name": "Jane Doe",
            "opleiding": "Informatica",
            "afstudeerdatum": "2024-06-01"
        }))
        .await;

    let (status, _) = send(app.issuer(), post_json("/verify", &json!({"jwt": token}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.config.issuer_did.as_str(), ISSUER_DID);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/issue")
        .header("Origin", "null")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.issuer(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
