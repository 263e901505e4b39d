//! Status command - show configuration and status

use std::path::Path;

use anyhow::Result;
use console::style;

pub fn show(config: Option<&Path>) -> Result<()> {
    println!("\n{}", style("Credo Status").bold().underlined());
    println!();

    // Version info
    println!("{}", style("Version").bold().underlined());
    println!("  credo-cli:       {}", env!("CARGO_PKG_VERSION"));
    println!();

    // Environment
    println!("{}", style("Environment").bold().underlined());
    println!(
        "  CREDO_BIND:      {}",
        std::env::var("CREDO_BIND").unwrap_or_else(|_| "role default".to_string())
    );
    println!(
        "  CREDO_CORS_ORIGINS: {}",
        std::env::var("CREDO_CORS_ORIGINS").unwrap_or_else(|_| "* (default)".to_string())
    );
    println!();

    // Trust configuration
    println!("{}", style("Trust Configuration").bold().underlined());
    let path = match super::config_path(config) {
        Ok(path) => path,
        Err(e) => {
            println!("  {}", style(e).red());
            return Ok(());
        }
    };
    println!("  File:            {}", style(path.display()).yellow());

    let trust = match super::load_config(Some(&path)) {
        Ok(trust) => trust,
        Err(e) => {
            println!("  {}", style(format!("{e:#}")).red());
            return Ok(());
        }
    };
    println!("  Issuer DID:      {}", style(&trust.issuer_did).cyan());
    println!("  Public key:      {}", trust.issuer_public_key_hex());
    println!(
        "  Private key:     {}",
        if trust.issuer_private_key.is_some() {
            style("Set").green()
        } else {
            style("Not set (verifier only)").yellow()
        }
    );
    println!("  Trusted issuers:");
    if trust.trusted_issuers.is_empty() {
        println!("    {}", style("(none)").dim());
    }
    for issuer in &trust.trusted_issuers {
        println!("    - {issuer}");
    }

    Ok(())
}
