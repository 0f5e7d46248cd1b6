use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use kensa_scanners::{ExportFormat, NetworkConfig, Verifier};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Contract address (0x + 40 hex characters)
    pub address: String,

    /// Named network to verify against
    #[arg(short, long, default_value = "mainnet")]
    pub network: String,

    /// Override the node RPC endpoint
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Override the explorer endpoint
    #[arg(long)]
    pub explorer_url: Option<String>,

    /// Explorer API key (falls back to KENSA_EXPLORER_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Export format instead of console output (json, csv, html)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Write the export to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the step log after the report
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn execute(args: VerifyArgs) -> Result<()> {
    let mut config = NetworkConfig::named(&args.network);
    if let Some(rpc_url) = args.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(explorer_url) = args.explorer_url {
        config.explorer_url = explorer_url;
    }
    config.explorer_api_key = args
        .api_key
        .or_else(|| std::env::var("KENSA_EXPLORER_KEY").ok());

    tracing::debug!(network = %config.network, rpc = %config.rpc_url, "starting verification");

    let mut verifier = Verifier::new(config);
    match verifier.verify(&args.address).await {
        Ok(report) => super::emit_report(&report, args.format, args.output.as_ref(), args.verbose),
        Err(e) => {
            for step in verifier.steps() {
                eprintln!("  [{}] {}", step.kind, step.message);
            }
            eprintln!("{} {e}", "verification failed:".red().bold());
            if e.is_retryable() {
                eprintln!("{}", "This error may be transient; try again.".dimmed());
            }
            Err(e).context("verification did not complete")
        }
    }
}
