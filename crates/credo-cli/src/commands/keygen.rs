//! Keygen command - bootstraps a trust configuration

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use console::style;
use credo_core::{IssuerId, SecretHex, TrustConfig};
use credo_crypto::IssuerSigningKey;

/// Fresh configuration for `did` that trusts itself
pub fn generate_config(did: &str) -> TrustConfig {
    let key = IssuerSigningKey::generate();
    TrustConfig {
        issuer_did: IssuerId::new(did),
        issuer_private_key: Some(SecretHex::new(format!("0x{}", key.to_hex()))),
        issuer_public_key: format!("0x{}", key.verifying_key().to_hex()),
        trusted_issuers: vec![IssuerId::new(did)],
    }
}

pub fn run(did: &str, output: Option<&Path>) -> Result<()> {
    if did.trim().is_empty() {
        bail!("issuer DID must not be empty");
    }
    let config = generate_config(did);
    let json = serde_json::to_string_pretty(&config)?;

    match output {
        Some(path) => {
            if path.exists() {
                bail!("{} already exists; refusing to overwrite key material", path.display());
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{json}\n"))?;

            println!("{}", style("✓ Issuer key pair generated").green().bold());
            println!("  Issuer DID:  {}", style(&config.issuer_did).cyan());
            println!("  Public key:  {}", config.issuer_public_key);
            println!("  Written to:  {}", style(path.display()).yellow());
        }
        None => println!("{json}"),
    }

    Ok(())
}
