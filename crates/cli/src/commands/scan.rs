use anyhow::{bail, Context, Result};
use clap::Args;
use kensa_scanners::{
    BytecodeAnalyzer, ContractInfo, ExportFormat, RiskAggregator, SecurityReport, SourceAnalyzer,
    VerificationStep,
};
use std::path::PathBuf;

/// Placeholder identity for offline runs; scan inputs come from disk, not
/// from a chain.
const OFFLINE_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to a Solidity source file
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Path to a file containing deployed bytecode hex
    #[arg(short, long)]
    pub bytecode: Option<PathBuf>,

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

pub fn execute(args: ScanArgs) -> Result<()> {
    if args.source.is_none() && args.bytecode.is_none() {
        bail!("nothing to scan: pass --source and/or --bytecode");
    }

    let mut steps = Vec::new();
    let mut findings = Vec::new();

    let bytecode = match &args.bytecode {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read bytecode file {}", path.display()))?;
            raw.trim().to_string()
        }
        None => String::new(),
    };
    if !bytecode.is_empty() {
        steps.push(VerificationStep::info("Scanning local bytecode"));
        findings.extend(BytecodeAnalyzer::new().analyze(&bytecode));
    }

    let source = match &args.source {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read source file {}", path.display()))?,
        ),
        None => None,
    };
    if let Some(text) = &source {
        steps.push(VerificationStep::info("Scanning local source"));
        findings.extend(SourceAnalyzer::new().analyze(text));
    }

    let analysis = RiskAggregator::analyze(findings, source.as_deref());
    steps.push(VerificationStep::success(format!(
        "Risk level {}, score {}/100",
        analysis.risk_level, analysis.score
    )));

    let report = SecurityReport {
        contract: ContractInfo {
            address: OFFLINE_ADDRESS.to_string(),
            bytecode,
            is_verified: source.is_some(),
            source_code: source,
            ..Default::default()
        },
        analysis,
        steps,
    };

    super::emit_report(&report, args.format, args.output.as_ref(), args.verbose)
}
