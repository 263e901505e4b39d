//! Trust configuration
//!
//! Loaded once at process start and treated as read-only afterwards. The
//! file is picked in this order:
//!
//! 1. the path in `CREDO_CONFIG`, when set;
//! 2. `token/config.json`, the process-local override;
//! 3. `config.example.json`, the bundled default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CredoError;
use crate::issuer::IssuerId;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "CREDO_CONFIG";

/// Process-local override, relative to the working directory
pub const OVERRIDE_CONFIG_PATH: &str = "token/config.json";

/// Bundled default, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.example.json";

/// Hex-encoded secret key material (zeroed on drop)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretHex(String);

impl SecretHex {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The hex digits without an optional `0x` prefix (use carefully!)
    pub fn expose(&self) -> &str {
        strip_hex_prefix(&self.0)
    }
}

impl std::fmt::Debug for SecretHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretHex([REDACTED])")
    }
}

/// Strip an optional `0x`/`0X` prefix from a hex string
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Issuer identity, issuer key material and the verifier's trust list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Identity of the (single) issuer
    #[serde(rename = "issuerDid", alias = "issuerdid")]
    pub issuer_did: IssuerId,

    /// Issuer's secp256k1 private key (hex). Only the issuer needs it.
    #[serde(
        rename = "issuerPrivateKey",
        alias = "issuerprivatekey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub issuer_private_key: Option<SecretHex>,

    /// Issuer's SEC1 public key (hex), compressed or uncompressed
    #[serde(rename = "issuerPublicKey", alias = "issuerpublickey")]
    pub issuer_public_key: String,

    /// Issuer identities this verifier accepts
    #[serde(rename = "trustedIssuers", alias = "trustedissuers", default)]
    pub trusted_issuers: Vec<IssuerId>,
}

impl TrustConfig {
    /// Path of the configuration file in effect for this process.
    pub fn resolve_path() -> Result<PathBuf, CredoError> {
        let cwd = std::env::current_dir()
            .map_err(|e| CredoError::Config(format!("cannot read working directory: {e}")))?;
        Self::resolve_path_in(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from), &cwd)
    }

    /// Pick the configuration file: `explicit` when given, otherwise the
    /// override or the default under `base`.
    pub fn resolve_path_in(
        explicit: Option<PathBuf>,
        base: &Path,
    ) -> Result<PathBuf, CredoError> {
        if let Some(explicit) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(explicit);
        }
        Self::locate(base).ok_or_else(|| {
            CredoError::Config(format!(
                "no configuration found: expected {} or {}",
                OVERRIDE_CONFIG_PATH, DEFAULT_CONFIG_PATH
            ))
        })
    }

    /// Find the configuration file under `base`, preferring the override.
    pub fn locate(base: &Path) -> Option<PathBuf> {
        [OVERRIDE_CONFIG_PATH, DEFAULT_CONFIG_PATH]
            .into_iter()
            .map(|relative| base.join(relative))
            .find(|candidate| candidate.is_file())
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, CredoError> {
        tracing::debug!("Loading trust configuration from {}", path.display());

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Json))
            .build()?;
        let config: TrustConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CredoError> {
        let config: TrustConfig = serde_json::from_str(json)
            .map_err(|e| CredoError::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CredoError> {
        if self.issuer_did.as_str().trim().is_empty() {
            return Err(CredoError::Config("issuerDid must not be empty".into()));
        }
        if strip_hex_prefix(&self.issuer_public_key).is_empty() {
            return Err(CredoError::Config("issuerPublicKey must not be empty".into()));
        }
        Ok(())
    }

    /// Whether `issuer` is on the trust list
    pub fn trusts(&self, issuer: &IssuerId) -> bool {
        self.trusted_issuers.contains(issuer)
    }

    /// Issuer's public key hex without an optional `0x` prefix
    pub fn issuer_public_key_hex(&self) -> &str {
        strip_hex_prefix(&self.issuer_public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "issuerDid": "did:example:school",
        "issuerPrivateKey": "0xc0ffee",
        "issuerPublicKey": "0x02abcdef",
        "trustedIssuers": ["did:example:school"]
    }"#;

    #[test]
    fn test_from_json() {
        let config = TrustConfig::from_json(EXAMPLE).unwrap();
        assert_eq!(config.issuer_did.as_str(), "did:example:school");
        assert_eq!(config.issuer_public_key_hex(), "02abcdef");
        assert_eq!(config.issuer_private_key.as_ref().unwrap().expose(), "c0ffee");
        assert!(config.trusts(&IssuerId::new("did:example:school")));
        assert!(!config.trusts(&IssuerId::new("did:example:other")));
    }

    #[test]
    fn test_private_key_is_optional_and_redacted() {
        let config = TrustConfig::from_json(
            r#"{"issuerDid": "did:example:school", "issuerPublicKey": "02ab"}"#,
        )
        .unwrap();
        assert!(config.issuer_private_key.is_none());
        assert!(config.trusted_issuers.is_empty());

        let with_key = TrustConfig::from_json(EXAMPLE).unwrap();
        assert!(!format!("{with_key:?}").contains("c0ffee"));
    }

    #[test]
    fn test_rejects_empty_issuer() {
        let err = TrustConfig::from_json(r#"{"issuerDid": " ", "issuerPublicKey": "02ab"}"#)
            .unwrap_err();
        assert!(matches!(err, CredoError::Config(_)));
    }

    #[test]
    fn test_override_file_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TrustConfig::locate(dir.path()).is_none());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_PATH), EXAMPLE).unwrap();
        assert_eq!(
            TrustConfig::locate(dir.path()).unwrap(),
            dir.path().join(DEFAULT_CONFIG_PATH)
        );

        std::fs::create_dir_all(dir.path().join("token")).unwrap();
        std::fs::write(
            dir.path().join(OVERRIDE_CONFIG_PATH),
            EXAMPLE.replace("did:example:school", "did:example:override"),
        )
        .unwrap();
        let path = TrustConfig::locate(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(OVERRIDE_CONFIG_PATH));

        let config = TrustConfig::from_file(&path).unwrap();
        assert_eq!(config.issuer_did.as_str(), "did:example:override");
        assert_eq!(config.trusted_issuers, vec![IssuerId::new("did:example:override")]);
    }

    #[test]
    fn test_explicit_path_wins_over_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_PATH), EXAMPLE).unwrap();
        std::fs::create_dir_all(dir.path().join("token")).unwrap();
        std::fs::write(dir.path().join(OVERRIDE_CONFIG_PATH), EXAMPLE).unwrap();

        let explicit = dir.path().join("elsewhere.json");
        std::fs::write(
            &explicit,
            EXAMPLE.replace("did:example:school", "did:example:explicit"),
        )
        .unwrap();

        let path = TrustConfig::resolve_path_in(Some(explicit.clone()), dir.path()).unwrap();
        assert_eq!(path, explicit);
        let config = TrustConfig::from_file(&path).unwrap();
        assert_eq!(config.issuer_did.as_str(), "did:example:explicit");

        assert_eq!(
            TrustConfig::resolve_path_in(None, dir.path()).unwrap(),
            dir.path().join(OVERRIDE_CONFIG_PATH)
        );
        assert_eq!(
            TrustConfig::resolve_path_in(Some(PathBuf::new()), dir.path()).unwrap(),
            dir.path().join(OVERRIDE_CONFIG_PATH)
        );
    }

    #[test]
    fn test_resolve_without_any_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TrustConfig::resolve_path_in(None, dir.path()),
            Err(CredoError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(TrustConfig::from_file(&path), Err(CredoError::Config(_))));
    }
}
