//! Serve command - starts the HTTP server of a role

use std::path::Path;

use anyhow::Result;
use console::style;
use credo_server::Role;

pub async fn run(config: Option<&Path>, role: &str, bind: Option<String>) -> Result<()> {
    let role: Role = role.parse()?;
    let config = super::load_config(config)?;
    let bind = bind.unwrap_or_else(|| role.default_bind().to_string());

    println!(
        "\n{} {}",
        style("Credo").cyan().bold(),
        style(format!("{role} server")).cyan()
    );
    println!("  Listening on: {}", style(format!("http://{bind}")).green());
    match role {
        Role::Issuer => println!("  POST /issue    {{name, opleiding, afstudeerdatum}}"),
        Role::Verifier => println!("  POST /verify   {{jwt | vcJwt | token}}"),
    }
    println!("  GET  /health");
    println!();

    credo_server::serve(role, &config, &bind).await
}
