//! Application state

use std::sync::Arc;

use credo_core::{CredoError, TrustConfig};
use credo_issuer::Issuer;
use credo_verifier::Verifier;

/// State of the issuer role. The signing key is read-only after load, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct IssuerState {
    pub issuer: Arc<Issuer>,
}

impl IssuerState {
    pub fn new(issuer: Issuer) -> Self {
        Self {
            issuer: Arc::new(issuer),
        }
    }

    pub fn from_config(config: &TrustConfig) -> Result<Self, CredoError> {
        Ok(Self::new(Issuer::from_config(config)?))
    }
}

/// State of the verifier role
#[derive(Clone)]
pub struct VerifierState {
    pub verifier: Arc<Verifier>,
}

impl VerifierState {
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    pub fn from_config(config: &TrustConfig) -> Result<Self, CredoError> {
        Ok(Self::new(Verifier::from_config(config)?))
    }
}
