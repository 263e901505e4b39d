//! Issuer key resolution
//!
//! Maps an issuer identity to the key its tokens must verify against.
//! Resolution says nothing about trust: a key can be known for an issuer
//! the verifier still refuses.

use std::collections::HashMap;

use credo_core::{CredoError, IssuerId, TrustConfig};
use credo_crypto::IssuerVerifyingKey;

/// Resolves an issuer identity to its verification key
pub trait IssuerKeyResolver: Send + Sync {
    /// Look up the verification key of `issuer`, or `None` when unknown
    fn resolve_issuer_key(&self, issuer: &IssuerId) -> Option<IssuerVerifyingKey>;
}

/// Fixed in-memory issuer-to-key map
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    keys: HashMap<IssuerId, IssuerVerifyingKey>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of one issuer key
    pub fn with_key(mut self, issuer: IssuerId, key: IssuerVerifyingKey) -> Self {
        self.insert(issuer, key);
        self
    }

    pub fn insert(&mut self, issuer: IssuerId, key: IssuerVerifyingKey) {
        self.keys.insert(issuer, key);
    }

    /// Single-entry resolver for the configured issuer
    pub fn from_config(config: &TrustConfig) -> Result<Self, CredoError> {
        let key = IssuerVerifyingKey::from_hex(config.issuer_public_key_hex())?;
        Ok(Self::new().with_key(config.issuer_did.clone(), key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl IssuerKeyResolver for StaticResolver {
    fn resolve_issuer_key(&self, issuer: &IssuerId) -> Option<IssuerVerifyingKey> {
        self.keys.get(issuer).cloned()
    }
}
