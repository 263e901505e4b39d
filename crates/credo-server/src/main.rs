//! Credo Server
//!
//! `credo-server issuer` and `credo-server verifier` serve one role per
//! process. `credo-server serve` (or no argument) serves the role named by
//! `CREDO_ROLE`, defaulting to the verifier. Any other argument is taken as a
//! token: it is verified, the outcome printed, and the process exits with
//! status 0 when the credential is accepted and 1 otherwise.

use std::path::Path;

use anyhow::Context;
use credo_core::TrustConfig;
use credo_server::Invocation;
use credo_verifier::Verifier;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "credo=info,credo_server=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let first = std::env::args().nth(1);
    let env_role = std::env::var("CREDO_ROLE").ok();
    let invocation = Invocation::from_args(first.as_deref(), env_role.as_deref())?;

    // Load configuration
    let config_path = TrustConfig::resolve_path()?;
    let config = load_config(&config_path)?;

    match invocation {
        Invocation::Serve(role) => {
            let addr =
                std::env::var("CREDO_BIND").unwrap_or_else(|_| role.default_bind().to_string());
            credo_server::serve(role, &config, &addr).await
        }
        Invocation::Verify(token) => {
            let verifier = Verifier::from_config(&config)?;
            match verifier.verify(&token) {
                Ok(payload) => {
                    println!("=== Credential valid - access granted ===");
                    println!("Payload: {}", serde_json::to_string_pretty(&payload)?);
                    Ok(())
                }
                Err(err) => {
                    eprintln!("=== Credential invalid - access denied ===");
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<TrustConfig> {
    let config = TrustConfig::from_file(path)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    tracing::info!("Loaded trust configuration from {}", path.display());
    Ok(config)
}
