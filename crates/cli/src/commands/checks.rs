use anyhow::Result;
use clap::Args;
use colored::*;
use kensa_scanners::{BytecodeAnalyzer, SourceAnalyzer};

#[derive(Args, Debug)]
pub struct ChecksArgs {}

pub fn execute(_args: ChecksArgs) -> Result<()> {
    let bytecode = BytecodeAnalyzer::new();
    let source = SourceAnalyzer::new();

    println!("{}", "Bytecode checks".bright_blue().bold());
    for check in bytecode.checks() {
        println!(
            "  {:<28} {:<10} {}",
            check.id(),
            check.severity().to_string(),
            check.name()
        );
    }

    println!("\n{}", "Source checks".bright_blue().bold());
    for check in source.checks() {
        println!(
            "  {:<28} {:<10} {}",
            check.id(),
            check.severity().to_string(),
            check.name()
        );
    }

    println!(
        "\n{} severities shown are each check's ceiling, not a verdict",
        "note:".dimmed()
    );
    Ok(())
}
