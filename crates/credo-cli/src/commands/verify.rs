//! Verify command - checks a credential token

use std::path::Path;

use anyhow::Result;
use console::style;
use credo_verifier::Verifier;

/// Verify `token`. Returns whether access is granted.
pub fn run(config: Option<&Path>, token: &str) -> Result<bool> {
    let config = super::load_config(config)?;
    let verifier = Verifier::from_config(&config)?;

    match verifier.verify(token) {
        Ok(payload) => {
            println!("{}", style("=== Credential valid - access granted ===").green().bold());
            println!("Payload: {}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
        Err(err) => {
            eprintln!("{}", style("=== Credential invalid - access denied ===").red().bold());
            eprintln!("{err}");
            Ok(false)
        }
    }
}
