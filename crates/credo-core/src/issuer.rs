//! Issuer types for Credo
//!
//! Issuers are the parties that sign diploma credentials.

use serde::{Deserialize, Serialize};

/// Prefix of every derived subject identifier.
pub const SUBJECT_DID_PREFIX: &str = "did:example:";

/// Unique identifier for an issuer (a DID-like URI)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssuerId(pub String);

impl IssuerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssuerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IssuerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Derive the subject identifier for a credential holder from their name.
///
/// The name is lower-cased and every whitespace run between words becomes a
/// single `-`. Leading and trailing whitespace is dropped rather than turned
/// into dashes, so `"  Jane Doe "` and `"Jane Doe"` share a subject.
/// The result is a display hint only: two people sharing a name map to the
/// same subject, so it must never be used as a unique key.
pub fn derive_subject(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("{SUBJECT_DID_PREFIX}{slug}")
}
