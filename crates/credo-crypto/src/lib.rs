//! Credo Crypto
//!
//! secp256k1 key material and compact JWS (ES256K) for Credo credentials.

pub mod jws;
pub mod keys;

pub use jws::{JwsError, JwsHeader, UnverifiedJws, ALG_ES256K};
pub use keys::{IssuerSigningKey, IssuerVerifyingKey, KeyError};
