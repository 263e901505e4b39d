//! Credo Issuer
//!
//! Credential issuance service: turns a diploma claim into a signed
//! ES256K token under the issuer's key.

use chrono::Utc;
use credo_core::{CredentialPayload, CredoError, DiplomaClaim, IssuerId, TrustConfig};
use credo_crypto::{jws, IssuerSigningKey, IssuerVerifyingKey, JwsError};
use serde::Serialize;

/// A freshly issued credential
#[derive(Debug, Clone, Serialize)]
pub struct IssuedCredential {
    /// The encoded token string
    pub token: String,

    /// The payload that was signed
    pub payload: CredentialPayload,
}

impl IssuedCredential {
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

/// Credential issuer service
pub struct Issuer {
    id: IssuerId,
    signing_key: IssuerSigningKey,
}

impl Issuer {
    /// Create an issuer from its identity and signing key
    pub fn new(id: IssuerId, signing_key: IssuerSigningKey) -> Self {
        Self { id, signing_key }
    }

    /// Create the issuer described by a trust configuration.
    ///
    /// Fails with a configuration error when the private key is absent or
    /// malformed, so a process never starts serving with an unusable key.
    pub fn from_config(config: &TrustConfig) -> Result<Self, CredoError> {
        let secret = config
            .issuer_private_key
            .as_ref()
            .ok_or_else(|| CredoError::Config("issuerPrivateKey is not configured".into()))?;
        let signing_key = IssuerSigningKey::from_hex(secret.expose())?;

        let derived = signing_key.verifying_key();
        match IssuerVerifyingKey::from_hex(config.issuer_public_key_hex()) {
            Ok(configured) if configured != derived => tracing::warn!(
                "issuerPublicKey does not match issuerPrivateKey; \
                 verifiers will reject tokens from {}",
                config.issuer_did
            ),
            Err(e) => tracing::warn!("issuerPublicKey is unusable: {}", e),
            Ok(_) => {}
        }

        Ok(Self::new(config.issuer_did.clone(), signing_key))
    }

    pub fn id(&self) -> &IssuerId {
        &self.id
    }

    pub fn verifying_key(&self) -> IssuerVerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Issue a diploma credential valid for 365 days from now
    pub fn issue(&self, claim: DiplomaClaim) -> Result<IssuedCredential, CredoError> {
        self.issue_at(claim, Utc::now().timestamp())
    }

    /// Issue a diploma credential as of `now` (Unix seconds).
    ///
    /// The claim is validated before any signing work is done.
    pub fn issue_at(&self, claim: DiplomaClaim, now: i64) -> Result<IssuedCredential, CredoError> {
        claim.validate()?;

        let payload = CredentialPayload::new(self.id.clone(), claim, now);
        let token = jws::encode(&payload, &self.signing_key).map_err(|e| match e {
            JwsError::Serialization(msg) => CredoError::Serialization(msg),
            other => CredoError::Signing(other.to_string()),
        })?;

        tracing::info!(
            "Issued diploma credential for {} (issuer {}, expires {})",
            payload.sub,
            payload.iss,
            payload.exp
        );

        Ok(IssuedCredential { token, payload })
    }
}

impl std::fmt::Debug for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuer")
            .field("id", &self.id)
            .field("verifying_key", &self.verifying_key())
            .finish()
    }
}
