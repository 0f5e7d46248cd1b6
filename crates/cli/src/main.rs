use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{checks::ChecksArgs, scan::ScanArgs, verify::VerifyArgs};

#[derive(Parser)]
#[command(name = "kensa")]
#[command(about = "Heuristic security analysis for deployed EVM contracts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a deployed contract and run the full verification pipeline
    Verify(VerifyArgs),

    /// Analyze local bytecode and/or source files without touching the network
    Scan(ScanArgs),

    /// List the registered bytecode and source checks
    Checks(ChecksArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::verify::execute(args))
        }
        Commands::Scan(args) => commands::scan::execute(args),
        Commands::Checks(args) => commands::checks::execute(args),
    }
}
