//! Error types for Credo

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::issuer::IssuerId;

/// Main error type for Credo operations
#[derive(Error, Debug)]
pub enum CredoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl CredoError {
    /// Whether the error was caused by the caller's input rather than by
    /// this process. Client errors map to a 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CredoError::Validation(_) | CredoError::Verification(_))
    }
}

impl From<serde_json::Error> for CredoError {
    fn from(err: serde_json::Error) -> Self {
        CredoError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CredoError {
    fn from(err: config::ConfigError) -> Self {
        CredoError::Config(err.to_string())
    }
}

/// Stage of the verification pipeline at which a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStage {
    Parse,
    IssuerResolution,
    Signature,
    Trust,
    Expiry,
}

impl VerificationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStage::Parse => "parse",
            VerificationStage::IssuerResolution => "issuer_resolution",
            VerificationStage::Signature => "signature",
            VerificationStage::Trust => "trust",
            VerificationStage::Expiry => "expiry",
        }
    }
}

impl std::fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a credential token by the verifier.
///
/// Every variant is an expected business outcome, not a fault of the
/// verifying process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unknown issuer: {0}")]
    UnknownIssuer(IssuerId),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Issuer {0} is not trusted")]
    UntrustedIssuer(IssuerId),

    #[error("Credential expired at {expired_at} (now {now})")]
    Expired { expired_at: i64, now: i64 },
}

impl VerificationError {
    /// The pipeline stage that produced this rejection
    pub fn stage(&self) -> VerificationStage {
        match self {
            VerificationError::MalformedToken(_) => VerificationStage::Parse,
            VerificationError::UnknownIssuer(_) => VerificationStage::IssuerResolution,
            VerificationError::InvalidSignature(_) => VerificationStage::Signature,
            VerificationError::UntrustedIssuer(_) => VerificationStage::Trust,
            VerificationError::Expired { .. } => VerificationStage::Expiry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(CredoError::Validation("name".into()).is_client_error());
        let rejected = VerificationError::InvalidSignature("x".into());
        assert!(CredoError::from(rejected).is_client_error());
        assert!(!CredoError::Config("bad key".into()).is_client_error());
        assert!(!CredoError::Signing("boom".into()).is_client_error());
    }

    #[test]
    fn test_untrusted_issuer_message() {
        let err = VerificationError::UntrustedIssuer(IssuerId::new("did:example:rogue"));
        assert_eq!(err.to_string(), "Issuer did:example:rogue is not trusted");
        assert_eq!(err.stage(), VerificationStage::Trust);
    }
}
