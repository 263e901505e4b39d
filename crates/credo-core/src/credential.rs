//! Credential types for Credo
//!
//! A credential is the payload of a signed token: who issued it, who it is
//! about, when it is valid, and the diploma claim itself.

use serde::{Deserialize, Serialize};

use crate::error::CredoError;
use crate::issuer::{derive_subject, IssuerId};

/// Validity window of every issued credential (365 days)
pub const VALIDITY_SECONDS: i64 = 60 * 60 * 24 * 365;

/// JSON-LD context of the W3C credentials data model
pub const VC_CONTEXT_V1: &str = "https://www.w3.org/2018/credentials/v1";

/// Base type shared by every verifiable credential
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Schema tag of the diploma credential
pub const DIPLOMA_CREDENTIAL_TYPE: &str = "DiplomaCredential";

/// The diploma claim (credential subject)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiplomaClaim {
    /// Full name of the graduate
    pub name: String,

    /// Program or qualification that was completed
    #[serde(rename = "opleiding")]
    pub program: String,

    /// Completion date, kept as the caller supplied it
    #[serde(rename = "afstudeerdatum")]
    pub completion_date: String,
}

impl DiplomaClaim {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        completion_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            completion_date: completion_date.into(),
        }
    }

    /// Check that every field is present (non-blank).
    pub fn validate(&self) -> Result<(), CredoError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("opleiding", &self.program),
            ("afstudeerdatum", &self.completion_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CredoError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// The `vc` object embedded in the token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBody {
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,

    #[serde(rename = "type")]
    pub types: Vec<String>,

    #[serde(rename = "credentialSubject")]
    pub credential_subject: DiplomaClaim,
}

impl CredentialBody {
    /// Wrap a claim as a diploma credential
    pub fn diploma(claim: DiplomaClaim) -> Self {
        Self {
            context: vec![VC_CONTEXT_V1.to_string()],
            types: vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                DIPLOMA_CREDENTIAL_TYPE.to_string(),
            ],
            credential_subject: claim,
        }
    }
}

/// Signed-token payload of a diploma credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPayload {
    /// Issuer (iss)
    pub iss: IssuerId,

    /// Subject (sub), derived from the claim's name
    pub sub: String,

    /// Issued at (iat), Unix seconds
    pub iat: i64,

    /// Expiration time (exp), Unix seconds
    pub exp: i64,

    /// The credential itself
    pub vc: CredentialBody,
}

impl CredentialPayload {
    /// Build the payload for a claim issued at `now`.
    pub fn new(issuer: IssuerId, claim: DiplomaClaim, now: i64) -> Self {
        Self {
            iss: issuer,
            sub: derive_subject(&claim.name),
            iat: now,
            exp: now + VALIDITY_SECONDS,
            vc: CredentialBody::diploma(claim),
        }
    }

    /// The diploma claim carried by this credential
    pub fn claim(&self) -> &DiplomaClaim {
        &self.vc.credential_subject
    }

    /// Check expiry against a reference time. A credential is still valid
    /// during the second named by `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }
}
