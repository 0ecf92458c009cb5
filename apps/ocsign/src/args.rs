use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Absolute URL of the resource to sign (must not end with `/`)
    pub url: String,

    /// HTTP method the signed URL is bound to
    #[arg(long, short, default_value = "GET")]
    pub method: String,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Signed URL to check
    pub url: String,

    /// HTTP method of the request being authorized
    #[arg(long, short, default_value = "GET")]
    pub method: String,

    /// Print the outcome as a JSON object
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ToolSubcommand {
    /// Sign a URL and print the result
    Generate(GenerateArgs),
    /// Verify a signed URL; exits non-zero unless it is accepted
    Verify(VerifyArgs),
}

#[derive(Debug, Parser)]
#[command(about, version)]
pub struct ToolArgs {
    /// JSON file with signer options; defaults to `OCSIGN_*` environment variables
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: ToolSubcommand,
}
