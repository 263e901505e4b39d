//! Credo Verifier
//!
//! Checks diploma credential tokens. Verification is a fail-fast pipeline:
//!
//! ```text
//! Received -> Parsed -> IssuerResolved -> SignatureVerified
//!          -> TrustChecked -> ExpiryChecked -> Accepted
//! ```
//!
//! Any stage may end in a rejection carrying that stage and a reason; no
//! partially verified credential is ever returned.

pub mod resolver;

use std::collections::HashSet;

use chrono::Utc;
use credo_core::{CredentialPayload, CredoError, IssuerId, TrustConfig, VerificationError};
use credo_crypto::{JwsError, UnverifiedJws};

pub use resolver::{IssuerKeyResolver, StaticResolver};

/// Credential verifier
pub struct Verifier {
    resolver: Box<dyn IssuerKeyResolver>,
    trusted_issuers: HashSet<IssuerId>,
}

impl Verifier {
    /// Create a verifier from a key resolver and a trust list
    pub fn new(
        resolver: impl IssuerKeyResolver + 'static,
        trusted_issuers: impl IntoIterator<Item = IssuerId>,
    ) -> Self {
        Self {
            resolver: Box::new(resolver),
            trusted_issuers: trusted_issuers.into_iter().collect(),
        }
    }

    /// Create the verifier described by a trust configuration
    pub fn from_config(config: &TrustConfig) -> Result<Self, CredoError> {
        let resolver = StaticResolver::from_config(config)?;
        Ok(Self::new(resolver, config.trusted_issuers.iter().cloned()))
    }

    pub fn is_trusted(&self, issuer: &IssuerId) -> bool {
        self.trusted_issuers.contains(issuer)
    }

    /// Verify a token against the wall clock
    pub fn verify(&self, token: &str) -> Result<CredentialPayload, VerificationError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now` (Unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> Result<CredentialPayload, VerificationError> {
        match self.run_pipeline(token, now) {
            Ok(payload) => {
                tracing::info!(
                    "Accepted diploma credential for {} from {}",
                    payload.sub,
                    payload.iss
                );
                Ok(payload)
            }
            Err(err) => {
                tracing::info!("Rejected credential at {} stage: {}", err.stage(), err);
                Err(err)
            }
        }
    }

    fn run_pipeline(&self, token: &str, now: i64) -> Result<CredentialPayload, VerificationError> {
        // Parsed
        let jws = UnverifiedJws::<CredentialPayload>::parse(token).map_err(|e| match e {
            JwsError::UnsupportedAlgorithm(alg) => {
                VerificationError::MalformedToken(format!("unsupported algorithm {alg}"))
            }
            other => VerificationError::MalformedToken(other.to_string()),
        })?;
        let issuer = jws.claims.iss.clone();

        // IssuerResolved
        let key = self
            .resolver
            .resolve_issuer_key(&issuer)
            .ok_or_else(|| VerificationError::UnknownIssuer(issuer.clone()))?;

        // SignatureVerified
        jws.verify(&key)
            .map_err(|e| VerificationError::InvalidSignature(e.to_string()))?;

        // TrustChecked
        if !self.is_trusted(&issuer) {
            return Err(VerificationError::UntrustedIssuer(issuer));
        }

        // ExpiryChecked
        let payload = jws.into_claims();
        if payload.is_expired_at(now) {
            return Err(VerificationError::Expired {
                expired_at: payload.exp,
                now,
            });
        }

        Ok(payload)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("trusted_issuers", &self.trusted_issuers)
            .finish_non_exhaustive()
    }
}
