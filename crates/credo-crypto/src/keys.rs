//! secp256k1 key material
//!
//! The issuer signs with a 32-byte private scalar; verifiers hold the
//! matching SEC1 public key. Both are exchanged as hex, with an optional
//! `0x` prefix.

use credo_core::config::strip_hex_prefix;
use credo_core::CredoError;
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

impl From<KeyError> for CredoError {
    fn from(err: KeyError) -> Self {
        CredoError::Config(err.to_string())
    }
}

fn decode_hex(hex_str: &str) -> Result<Vec<u8>, KeyError> {
    hex::decode(strip_hex_prefix(hex_str.trim())).map_err(|e| KeyError::InvalidHex(e.to_string()))
}

/// Issuer's ECDSA signing key (zeroed on drop by `k256`)
#[derive(Clone)]
pub struct IssuerSigningKey {
    inner: SigningKey,
}

impl IssuerSigningKey {
    /// Parse a 32-byte private key from hex
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = decode_hex(hex_str)?;
        if bytes.len() != 32 {
            return Err(KeyError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(&bytes)
            .map_err(|_| KeyError::InvalidPrivateKey("scalar out of range".into()))?;
        Ok(Self { inner })
    }

    /// Generate a fresh key from the OS random number generator
    pub fn generate() -> Self {
        Self {
            inner: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// Hex encoding of the private scalar (use carefully!)
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner.to_bytes())
    }

    pub fn verifying_key(&self) -> IssuerVerifyingKey {
        IssuerVerifyingKey {
            inner: self.inner.verifying_key().clone(),
        }
    }

    /// ES256K signature: SHA-256 digest, 64-byte `r || s`, low-S
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        let signature: Signature = self.inner.sign(message);
        let mut out = [0u8; 64];
        out.copy_from_slice(&signature.to_bytes());
        out
    }
}

impl std::fmt::Debug for IssuerSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IssuerSigningKey([REDACTED])")
    }
}

/// Issuer's ECDSA verification key
#[derive(Clone, PartialEq, Eq)]
pub struct IssuerVerifyingKey {
    inner: VerifyingKey,
}

impl IssuerVerifyingKey {
    /// Parse a SEC1 public key (compressed or uncompressed) from hex
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = decode_hex(hex_str)?;
        let inner = VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| {
            KeyError::InvalidPublicKey(format!("not a SEC1 point ({} bytes)", bytes.len()))
        })?;
        Ok(Self { inner })
    }

    /// Compressed SEC1 hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner.to_encoded_point(true).as_bytes())
    }

    /// Check a 64-byte `r || s` signature over `message`
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), KeyError> {
        let signature = Signature::from_slice(signature).map_err(|_| {
            KeyError::InvalidSignature(format!("malformed ({} bytes)", signature.len()))
        })?;
        self.inner
            .verify(message, &signature)
            .map_err(|_| KeyError::InvalidSignature("signature does not match".into()))
    }
}

impl std::fmt::Debug for IssuerVerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IssuerVerifyingKey({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // secp256k1 generator: private key 1
    const ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "04\
        79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
        483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_known_public_key() {
        let key = IssuerSigningKey::from_hex(&format!("0x{ONE}")).unwrap();
        assert_eq!(key.verifying_key().to_hex(), G_COMPRESSED);

        let uncompressed = IssuerVerifyingKey::from_hex(G_UNCOMPRESSED).unwrap();
        assert_eq!(uncompressed, key.verifying_key());
    }

    #[test]
    fn test_sign_verify() {
        let key = IssuerSigningKey::generate();
        let public = key.verifying_key();
        let sig = key.sign(b"header.payload");

        assert!(public.verify(b"header.payload", &sig).is_ok());
        assert!(public.verify(b"header.payload!", &sig).is_err());

        let other = IssuerSigningKey::generate().verifying_key();
        assert!(other.verify(b"header.payload", &sig).is_err());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = IssuerSigningKey::from_hex(ONE).unwrap();
        assert_eq!(key.sign(b"message"), key.sign(b"message"));
    }

    #[test]
    fn test_rejects_bad_key_material() {
        assert!(matches!(IssuerSigningKey::from_hex("zz"), Err(KeyError::InvalidHex(_))));
        assert!(matches!(
            IssuerSigningKey::from_hex("0x0102"),
            Err(KeyError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            IssuerSigningKey::from_hex(&"00".repeat(32)),
            Err(KeyError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            IssuerVerifyingKey::from_hex("02abcdef"),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_hex_round_trip_and_redaction() {
        let key = IssuerSigningKey::generate();
        let restored = IssuerSigningKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(restored.verifying_key(), key.verifying_key());
        assert_eq!(format!("{key:?}"), "IssuerSigningKey([REDACTED])");
    }
}
