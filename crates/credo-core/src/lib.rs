//! Credo Core
//!
//! Core domain types for Credo diploma credentials.
//! This crate defines the data model, the error taxonomy and the trust
//! configuration shared by the issuer and the verifier.

pub mod config;
pub mod credential;
pub mod error;
pub mod issuer;

pub use config::{SecretHex, TrustConfig};
pub use credential::{CredentialBody, CredentialPayload, DiplomaClaim, VALIDITY_SECONDS};
pub use error::{CredoError, VerificationError, VerificationStage};
pub use issuer::{derive_subject, IssuerId};
