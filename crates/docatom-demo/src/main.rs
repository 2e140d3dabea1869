//! docatom - command-line demo for the DocumentAtom client.
//!
//! # Configuration
//!
//! - `DOCATOM_ENDPOINT` - Base URL of the service, defaults to `http://localhost:8000/`
//! - `DOCATOM_TIMEOUT_MS` - Optional response timeout in milliseconds
//! - `RUST_LOG` - Log filter, e.g. `docatom=debug`
//!
//! # Usage
//!
//! ```text
//! docatom probe
//! docatom detect <file>
//! docatom extract <format> <file>
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use docatom_client::{AtomFormat, DocAtomError, DocumentAtomClient, Rejection};
use docatom_core::{ClientConfig, DEFAULT_ENDPOINT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: docatom <probe | detect <file> | extract <format> <file>>";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing to stderr so stdout carries only JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let client = build_client()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let output = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["probe"] => {
            let reachable = client.validate_connectivity().await.map_err(describe)?;
            serde_json::json!({ "endpoint": client.config().endpoint(), "reachable": reachable })
        }
        ["detect", file] => {
            let detected = client
                .type_detection()
                .detect_type(PathBuf::from(file))?
                .await
                .map_err(describe)?;
            serde_json::to_value(detected)?
        }
        ["extract", format, file] => {
            let format = AtomFormat::from_str(format)
                .map_err(|_| anyhow!("unknown format '{}'", format))?;
            let request = client.extract_atom().extract(format, PathBuf::from(file))?;

            let canceller = request.canceller();
            let atoms = tokio::select! {
                result = async { request.await } => result.map_err(describe)?,
                _ = tokio::signal::ctrl_c() => {
                    canceller.cancel();
                    bail!("interrupted");
                }
            };
            tracing::info!("Extracted {} atoms", atoms.len());
            serde_json::to_value(atoms)?
        }
        _ => bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Build a client from environment configuration.
fn build_client() -> Result<DocumentAtomClient> {
    let endpoint =
        std::env::var("DOCATOM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let mut config = ClientConfig::new(&endpoint)?;

    if let Ok(timeout) = std::env::var("DOCATOM_TIMEOUT_MS") {
        let timeout: i64 = timeout
            .parse()
            .context("DOCATOM_TIMEOUT_MS must be a number of milliseconds")?;
        config.set_timeout_ms(timeout)?;
    }

    tracing::info!("Using endpoint {}", config.endpoint());
    Ok(DocumentAtomClient::with_config(config)?)
}

/// Render a request failure the way the service reported it.
fn describe(err: DocAtomError) -> anyhow::Error {
    match err.rejection() {
        Rejection::Body(body) => anyhow!("service rejected the request: {}", body),
        Rejection::Message(message) => anyhow!(message),
    }
}
