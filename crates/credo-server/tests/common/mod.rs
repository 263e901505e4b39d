//! Test utilities for integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use credo_core::{IssuerId, SecretHex, TrustConfig};
use credo_crypto::IssuerSigningKey;
use serde_json::Value;
use tower::ServiceExt;

pub const ISSUER_DID: &str = "did:example:hogeschool";

/// Issuer and verifier routers sharing one trust configuration
pub struct TestApp {
    pub config: TrustConfig,
    issuer: Router,
    verifier: Router,
}

impl TestApp {
    /// Create both roles with a freshly generated issuer key
    pub fn new() -> Self {
        Self::with_trusted(vec![IssuerId::new(ISSUER_DID)])
    }

    /// Create both roles with a custom trust list
    pub fn with_trusted(trusted_issuers: Vec<IssuerId>) -> Self {
        let key = IssuerSigningKey::generate();
        let config = TrustConfig {
            issuer_did: IssuerId::new(ISSUER_DID),
            issuer_private_key: Some(SecretHex::new(format!("0x{}", key.to_hex()))),
            issuer_public_key: format!("0x{}", key.verifying_key().to_hex()),
            trusted_issuers,
        };

        let issuer = credo_server::create_router(credo_server::Role::Issuer, &config).unwrap();
        let verifier = credo_server::create_router(credo_server::Role::Verifier, &config).unwrap();

        Self {
            config,
            issuer,
            verifier,
        }
    }

    pub fn issuer(&self) -> Router {
        self.issuer.clone()
    }

    pub fn verifier(&self) -> Router {
        self.verifier.clone()
    }

    /// Issue a credential through the HTTP API and return the token
    pub async fn issue_token(&self, body: Value) -> String {
        let (status, json) = send(self.issuer(), post_json("/issue", &body)).await;
        assert_eq!(status, StatusCode::OK, "issue failed: {json}");
        json["vcJwt"].as_str().unwrap().to_string()
    }
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Send a request and decode the JSON response
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
