//! OCSign command-line tool.
//!
//! Issues and checks signed URLs with the same signer a resource server would
//! use. Signer options come from a JSON file (`--config`) or from the
//! environment.
//!
//! # Usage
//!
//! ```text
//! OCSIGN_CREDENTIAL=alice OCSIGN_SECRET_KEY=s3cr3t \
//!     ocsign generate https://cloud.example.com/files/a.txt --method PUT
//! ocsign --config signer.json verify '<signed url>' --method PUT --json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OCSIGN_CREDENTIAL` | *(required)* | Identity embedded in signed URLs |
//! | `OCSIGN_SECRET_KEY` | *(required)* | Shared signing secret |
//! | `OCSIGN_TTL` | `60` | Validity window in seconds |
//! | `OCSIGN_ALGORITHM` | `sha512` | Hash used inside PBKDF2 |
//! | `OCSIGN_ITERATIONS` | `10000` | PBKDF2 work factor |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod args;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use ocsign_auth::{Signer, VerifyOutcome};
use ocsign_core::{SignerConfig, SignerOptions};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{ToolArgs, ToolSubcommand};

/// JSON rendering of a verification outcome.
#[derive(Debug, Serialize)]
struct VerifyReport {
    outcome: &'static str,
    status: u16,
}

impl From<VerifyOutcome> for VerifyReport {
    fn from(outcome: VerifyOutcome) -> Self {
        Self {
            outcome: outcome.as_str(),
            status: outcome.as_u16(),
        }
    }
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_owned())
}

/// Load signer options from a JSON file, or from the environment without one.
fn load_options(path: Option<&Path>) -> Result<Option<SignerOptions>> {
    let Some(path) = path else {
        return SignerOptions::from_env().map_err(|e| anyhow!("{e} [{}]", e.code()));
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let options = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    Ok(Some(options))
}

fn build_signer(path: Option<&Path>) -> Result<Signer> {
    let config =
        SignerConfig::from_options(load_options(path)?).map_err(|e| anyhow!("{e} [{}]", e.code()))?;

    info!(
        credential = %config.credential(),
        ttl_seconds = config.ttl_seconds(),
        algorithm = %config.algorithm(),
        "configured signer"
    );

    Ok(Signer::new(config))
}

fn render_outcome(outcome: VerifyOutcome, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(&VerifyReport::from(outcome))
            .context("failed to serialize verification report");
    }
    Ok(format!("{outcome} ({})", outcome.as_u16()))
}

fn main() -> Result<ExitCode> {
    let args = ToolArgs::parse();
    init_tracing(&log_level())?;

    let signer = build_signer(args.config.as_deref())?;

    match args.subcommand {
        ToolSubcommand::Generate(generate) => {
            let url = signer
                .generate(&generate.url, &generate.method)
                .map_err(|e| anyhow!("{e} [{}]", e.code()))?;
            println!("{url}");
            Ok(ExitCode::SUCCESS)
        }
        ToolSubcommand::Verify(verify) => {
            let outcome = signer.verify_with_method(&verify.url, &verify.method);
            println!("{}", render_outcome(outcome, verify.json)?);
            Ok(if outcome.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
