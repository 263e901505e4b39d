//! Credo CLI
//!
//! Command-line interface for issuing and verifying diploma credentials.
//!
//! `credo verify <TOKEN>` and `credo serve [ROLE]` do the same as
//! `credo-server <TOKEN>` and `credo-server serve`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "credo")]
#[command(author, version, about = "Credo: signed diploma credentials", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Trust configuration file (defaults to token/config.json, then config.example.json)
    #[arg(short, long, global = true, env = "CREDO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a credential token and print its payload
    Verify {
        /// The credential token (header.payload.signature)
        token: String,
    },

    /// Issue a diploma credential and print the token
    Issue {
        /// Full name of the graduate
        #[arg(long)]
        name: String,

        /// Program that was completed
        #[arg(long)]
        opleiding: String,

        /// Completion date
        #[arg(long)]
        afstudeerdatum: String,
    },

    /// Start the HTTP server of a role
    Serve {
        /// Role to serve (issuer, verifier)
        #[arg(default_value = "verifier")]
        role: String,

        /// Address to bind to (defaults to :3000 for issuer, :3001 for verifier)
        #[arg(short, long, env = "CREDO_BIND")]
        bind: Option<String>,
    },

    /// Generate a new issuer key pair and trust configuration
    Keygen {
        /// Issuer DID to put in the configuration
        #[arg(long, default_value = "did:example:issuer")]
        did: String,

        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration and status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("credo={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Verify { token } => {
            if !commands::verify::run(config, &token)? {
                std::process::exit(1);
            }
        }
        Commands::Issue {
            name,
            opleiding,
            afstudeerdatum,
        } => {
            commands::issue::run(config, name, opleiding, afstudeerdatum)?;
        }
        Commands::Serve { role, bind } => {
            commands::serve::run(config, &role, bind).await?;
        }
        Commands::Keygen { did, output } => {
            commands::keygen::run(&did, output.as_deref())?;
        }
        Commands::Status => {
            commands::status::show(config)?;
        }
    }

    Ok(())
}
