//! Compact JWS (ES256K)
//!
//! A token is `base64url(header).base64url(payload).base64url(signature)`,
//! unpadded. The signature covers the first two segments exactly as they
//! appear on the wire, so verification never re-serializes JSON.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::{IssuerSigningKey, IssuerVerifyingKey};

/// JOSE algorithm name for ECDSA over secp256k1 with SHA-256
pub const ALG_ES256K: &str = "ES256K";

/// JOSE `typ` of every issued token
pub const TYP_JWT: &str = "JWT";

#[derive(Error, Debug)]
pub enum JwsError {
    #[error("{0}")]
    Malformed(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("{0}")]
    InvalidSignature(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// JOSE header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    pub alg: String,
}

impl JwsHeader {
    pub fn es256k() -> Self {
        Self {
            typ: Some(TYP_JWT.to_string()),
            alg: ALG_ES256K.to_string(),
        }
    }
}

/// Serialize `claims`, sign with `key`, and return the compact token.
pub fn encode<T: Serialize>(claims: &T, key: &IssuerSigningKey) -> Result<String, JwsError> {
    let header = serde_json::to_vec(&JwsHeader::es256k())
        .map_err(|e| JwsError::Serialization(e.to_string()))?;
    let payload = serde_json::to_vec(claims).map_err(|e| JwsError::Serialization(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let signature = key.sign(signing_input.as_bytes());

    Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

/// A structurally valid token whose signature has not been checked yet
#[derive(Debug, Clone)]
pub struct UnverifiedJws<T> {
    pub header: JwsHeader,
    pub claims: T,
    signing_input: String,
    signature: String,
}

impl<T: DeserializeOwned> UnverifiedJws<T> {
    /// Split and decode a compact token.
    ///
    /// Fails when the token does not have three segments, when the header or
    /// payload does not decode, or when the header names another algorithm.
    /// The signature segment is only decoded by [`UnverifiedJws::verify`].
    pub fn parse(token: &str) -> Result<Self, JwsError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        let [header_b64, payload_b64, signature_b64] = segments[..] else {
            return Err(JwsError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        let header: JwsHeader = decode_segment(header_b64, "header")?;
        if header.alg != ALG_ES256K {
            return Err(JwsError::UnsupportedAlgorithm(header.alg));
        }
        let claims: T = decode_segment(payload_b64, "payload")?;

        Ok(Self {
            header,
            claims,
            signing_input: format!("{header_b64}.{payload_b64}"),
            signature: signature_b64.to_string(),
        })
    }
}

impl<T> UnverifiedJws<T> {
    /// Check the signature against `key`.
    pub fn verify(&self, key: &IssuerVerifyingKey) -> Result<(), JwsError> {
        let signature = URL_SAFE_NO_PAD
            .decode(&self.signature)
            .map_err(|e| JwsError::InvalidSignature(format!("signature is not base64url: {e}")))?;
        key.verify(self.signing_input.as_bytes(), &signature)
            .map_err(|e| JwsError::InvalidSignature(e.to_string()))
    }

    pub fn into_claims(self) -> T {
        self.claims
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, what: &str) -> Result<T, JwsError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwsError::Malformed(format!("{what} is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| JwsError::Malformed(format!("{what} is not valid JSON: {e}")))
}
