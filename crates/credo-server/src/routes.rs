//! HTTP route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use credo_core::{CredentialPayload, CredoError, DiplomaClaim, VerificationStage};
use serde::{Deserialize, Serialize};

use crate::state::{IssuerState, VerifierState};

/// Issue request body
#[derive(Debug, Default, Deserialize)]
pub struct IssueRequest {
    pub name: Option<String>,
    pub opleiding: Option<String>,
    pub afstudeerdatum: Option<String>,
}

impl IssueRequest {
    fn into_claim(self) -> DiplomaClaim {
        DiplomaClaim::new(
            self.name.unwrap_or_default(),
            self.opleiding.unwrap_or_default(),
            self.afstudeerdatum.unwrap_or_default(),
        )
    }
}

/// Issue response body
#[derive(Debug, Serialize, Deserialize)]
pub struct IssueResponse {
    #[serde(rename = "vcJwt")]
    pub vc_jwt: String,
}

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn issue_error(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// Issue a diploma credential
pub async fn issue(
    State(state): State<IssuerState>,
    body: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<Json<IssueResponse>, ErrorResponse> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Unreadable issue request: {}", rejection);
            IssueRequest::default()
        }
    };
    let claim = request.into_claim();
    if claim.validate().is_err() {
        return Err(issue_error(
            StatusCode::BAD_REQUEST,
            "name, opleiding and afstudeerdatum are required",
        ));
    }

    let issuer = state.issuer.clone();
    let issued = tokio::task::spawn_blocking(move || issuer.issue(claim))
        .await
        .map_err(|e| {
            tracing::error!("Issuance task failed: {}", e);
            issue_error(StatusCode::INTERNAL_SERVER_ERROR, "could not generate credential")
        })?;

    issued
        .map(|credential| {
            Json(IssueResponse {
                vc_jwt: credential.token,
            })
        })
        .map_err(issue_failure)
}

/// Map an issuance failure to a response. Internal details stay in the log.
fn issue_failure(err: CredoError) -> ErrorResponse {
    if err.is_client_error() {
        return issue_error(StatusCode::BAD_REQUEST, err.to_string());
    }
    tracing::error!("Error issuing credential: {}", err);
    issue_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "could not generate credential",
    )
}

/// Verify request body. The token may arrive under any of three names.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    pub jwt: Option<String>,
    #[serde(rename = "vcJwt")]
    pub vc_jwt: Option<String>,
    pub token: Option<String>,
}

impl VerifyRequest {
    /// First non-empty of `jwt`, `vcJwt`, `token`
    pub fn into_token(self) -> Option<String> {
        [self.jwt, self.vc_jwt, self.token]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }
}

/// Result of credential verification
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Whether the credential was accepted
    pub valid: bool,

    /// The decoded credential, when accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<CredentialPayload>,

    /// Reason for rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Pipeline stage that rejected the credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<VerificationStage>,
}

impl VerifyResponse {
    fn rejected(error: impl Into<String>, stage: Option<VerificationStage>) -> Self {
        Self {
            valid: false,
            payload: None,
            error: Some(error.into()),
            stage,
        }
    }
}

/// Verify a diploma credential. Every rejection is a 400: an invalid
/// credential is an expected outcome, not a server fault.
pub async fn verify(
    State(state): State<VerifierState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> (StatusCode, Json<VerifyResponse>) {
    let token = body.ok().and_then(|Json(request)| request.into_token());
    let Some(token) = token else {
        return (
            StatusCode::BAD_REQUEST,
            Json(VerifyResponse::rejected(
                "body must contain a token (jwt/vcJwt/token)",
                None,
            )),
        );
    };

    let verifier = state.verifier.clone();
    let outcome = match tokio::task::spawn_blocking(move || verifier.verify(&token)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Verification task failed: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(VerifyResponse::rejected("unknown verification error", None)),
            );
        }
    };

    match outcome {
        Ok(payload) => (
            StatusCode::OK,
            Json(VerifyResponse {
                valid: true,
                payload: Some(payload),
                error: None,
                stage: None,
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(VerifyResponse::rejected(e.to_string(), Some(e.stage()))),
        ),
    }
}

/// Health check of the issuer role
pub async fn issuer_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "role": "issuer" }))
}

/// Health check of the verifier role
pub async fn verifier_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "role": "verifier" }))
}
