//! Issue command - signs a diploma credential

use std::path::Path;

use anyhow::Result;
use console::style;
use credo_core::DiplomaClaim;
use credo_issuer::Issuer;

pub fn run(
    config: Option<&Path>,
    name: String,
    opleiding: String,
    afstudeerdatum: String,
) -> Result<()> {
    let config = super::load_config(config)?;
    let issuer = Issuer::from_config(&config)?;

    let issued = issuer.issue(DiplomaClaim::new(name, opleiding, afstudeerdatum))?;
    let expires = chrono::DateTime::from_timestamp(issued.payload.exp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| issued.payload.exp.to_string());

    eprintln!("\n{}", style("Issued Diploma Credential").bold().underlined());
    eprintln!("  Issuer:   {}", style(&issued.payload.iss).cyan());
    eprintln!("  Subject:  {}", issued.payload.sub);
    eprintln!("  Expires:  {}", style(expires).yellow());
    eprintln!();

    println!("{}", issued.token);
    Ok(())
}
