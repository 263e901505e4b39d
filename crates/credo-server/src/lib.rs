//! Credo Server Library
//!
//! HTTP surface of the Credo issuer and verifier roles. The library exposes
//! the routers for integration testing while the binaries handle startup.

pub mod routes;
pub mod state;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use credo_core::{CredoError, TrustConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use state::{IssuerState, VerifierState};

/// Which side of the trust ecosystem a process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Issuer,
    Verifier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Issuer => "issuer",
            Role::Verifier => "verifier",
        }
    }

    /// Default bind address of the role
    pub fn default_bind(&self) -> &'static str {
        match self {
            Role::Issuer => "0.0.0.0:3000",
            Role::Verifier => "0.0.0.0:3001",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = CredoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "issuer" => Ok(Role::Issuer),
            "verifier" => Ok(Role::Verifier),
            other => Err(CredoError::Config(format!(
                "unknown role '{other}', expected issuer or verifier"
            ))),
        }
    }
}

/// What a `credo-server` process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Serve the HTTP routes of a role
    Serve(Role),
    /// Verify one token, print the outcome and exit
    Verify(String),
}

impl Invocation {
    /// Interpret the first command-line argument.
    ///
    /// `issuer` and `verifier` pick the role to serve. `serve` (or no
    /// argument) serves `env_role`, falling back to the verifier. Anything
    /// else is a token to verify.
    pub fn from_args(first: Option<&str>, env_role: Option<&str>) -> Result<Self, CredoError> {
        match first.map(str::trim) {
            None | Some("") | Some("serve") => {
                let role = match env_role {
                    Some(role) => role.parse()?,
                    None => Role::Verifier,
                };
                Ok(Invocation::Serve(role))
            }
            Some(arg) => match arg.parse::<Role>() {
                Ok(role) => Ok(Invocation::Serve(role)),
                Err(_) => Ok(Invocation::Verify(arg.to_string())),
            },
        }
    }
}

/// Build CORS layer based on environment.
///
/// - `CREDO_CORS_ORIGINS`: comma-separated allowed origins (default: `*`).
/// - When set to `*`, all origins are allowed, so a local HTML page can
///   talk to both roles.
fn cors_layer() -> CorsLayer {
    let origins = std::env::var("CREDO_CORS_ORIGINS").unwrap_or_else(|_| "*".into());

    let allow_origin = if origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let parsed: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(std::time::Duration::from_secs(3600))
}

/// Create the issuer router
pub fn create_issuer_router(state: IssuerState) -> Router {
    Router::new()
        .route("/issue", post(routes::issue))
        .route("/health", get(routes::issuer_health))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Create the verifier router
pub fn create_verifier_router(state: VerifierState) -> Router {
    Router::new()
        .route("/verify", post(routes::verify))
        .route("/health", get(routes::verifier_health))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Create the router of `role` from a trust configuration.
///
/// Key material is parsed here, so a malformed key stops the process before
/// it accepts a single request.
pub fn create_router(role: Role, config: &TrustConfig) -> Result<Router, CredoError> {
    Ok(match role {
        Role::Issuer => create_issuer_router(IssuerState::from_config(config)?),
        Role::Verifier => create_verifier_router(VerifierState::from_config(config)?),
    })
}

/// Bind `addr` and serve `role` until the process is stopped
pub async fn serve(role: Role, config: &TrustConfig, addr: &str) -> anyhow::Result<()> {
    let app = create_router(role, config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Starting Credo {} server on {}", role, addr);
    axum::serve(listener, app).await?;
    Ok(())
}
