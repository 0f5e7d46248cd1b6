pub mod checks;
pub mod scan;
pub mod verify;

use anyhow::Result;
use colored::*;
use kensa_scanners::{ExportFormat, ReportExporter, RiskLevel, SecurityReport, StepKind};
use std::path::PathBuf;

/// Render a finished report to the console, or export it when a structured
/// format was requested.
pub fn emit_report(
    report: &SecurityReport,
    format: Option<ExportFormat>,
    output: Option<&PathBuf>,
    verbose: bool,
) -> Result<()> {
    match format {
        Some(format) => {
            let rendered = ReportExporter::export(report, format)?;
            match output {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    println!("Report written to {}", path.display());
                }
                None => println!("{rendered}"),
            }
            Ok(())
        }
        None => {
            render_console(report, verbose);
            Ok(())
        }
    }
}

fn render_console(report: &SecurityReport, verbose: bool) {
    let analysis = &report.analysis;

    println!("{}", "Contract Security Report".bright_blue().bold());
    println!("{}", "=".repeat(50).bright_blue());
    println!("Address:  {}", report.contract.address);
    if let Some(name) = &report.contract.contract_name {
        println!("Contract: {name}");
    }
    println!(
        "Source:   {}",
        if report.contract.is_verified {
            "verified"
        } else {
            "unverified (bytecode-only analysis)"
        }
    );

    let banner = format!(
        " Risk level: {} | score {}/100 ",
        analysis.risk_level, analysis.score
    );
    let banner = match analysis.risk_level {
        RiskLevel::Critical => banner.on_red().white().bold(),
        RiskLevel::High => banner.red().bold(),
        RiskLevel::Medium => banner.yellow().bold(),
        RiskLevel::Low => banner.green().bold(),
    };
    println!("\n{banner}\n");

    if analysis.vulnerabilities.is_empty() {
        println!("{}", "No findings.".green());
    } else {
        println!("Findings ({}):", analysis.vulnerabilities.len());
        for finding in &analysis.vulnerabilities {
            println!(
                "  {} {} [{}]",
                finding.severity.emoji(),
                finding.kind.to_string().bold(),
                finding.severity
            );
            println!("     {}", finding.description);
            println!("     {} {}", "fix:".dimmed(), finding.recommendation.dimmed());
        }
    }

    println!("\nGas efficiency: {}/100", analysis.gas.efficiency);
    for rec in &analysis.gas.recommendations {
        println!("  - {rec}");
    }

    let access = &analysis.access_control;
    println!(
        "\nAccess control: owner={} multisig={} timelock={}",
        access.has_owner, access.has_multisig, access.has_timelock
    );
    for risk in &access.risks {
        println!("  {} {}", "!".yellow(), risk);
    }

    if verbose {
        println!("\n{}", "Steps".bright_blue().bold());
        for step in &report.steps {
            let tag = match step.kind {
                StepKind::Info => "INFO".normal(),
                StepKind::Success => "OK".green(),
                StepKind::Warn => "WARN".yellow(),
                StepKind::Error => "ERR".red(),
            };
            println!(
                "  [{}] {:<5} {}",
                step.timestamp.format("%H:%M:%S%.3f"),
                tag,
                step.message
            );
        }
    }
}
