//! Export of a completed [`SecurityReport`] to alternate representations.
//!
//! Pure formatting: every format is derivable from the report alone, with
//! no further network access.

use crate::core::{RiskLevel, Severity};
use crate::runner::SecurityReport;
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Html,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "html" => Ok(ExportFormat::Html),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

/// Metadata header attached to the structured dump.
#[derive(Debug, Serialize)]
struct ExportEnvelope<'a> {
    generated_at: chrono::DateTime<Utc>,
    tool: &'static str,
    version: &'static str,
    report: &'a SecurityReport,
}

pub struct ReportExporter;

impl ReportExporter {
    pub fn export(report: &SecurityReport, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(report),
            ExportFormat::Csv => Ok(Self::to_csv(report)),
            ExportFormat::Html => Ok(Self::to_html(report)),
        }
    }

    fn to_json(report: &SecurityReport) -> Result<String> {
        let envelope = ExportEnvelope {
            generated_at: Utc::now(),
            tool: "kensa",
            version: crate::VERSION,
            report,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    fn to_csv(report: &SecurityReport) -> String {
        let mut out = String::from("field,value\n");
        out.push_str(&format!("address,{}\n", csv_escape(&report.contract.address)));
        out.push_str(&format!(
            "contract_name,{}\n",
            csv_escape(report.contract.contract_name.as_deref().unwrap_or(""))
        ));
        out.push_str(&format!("verified,{}\n", report.contract.is_verified));
        out.push_str(&format!("risk_level,{}\n", report.analysis.risk_level));
        out.push_str(&format!("score,{}\n", report.analysis.score));
        out.push_str(&format!(
            "gas_efficiency,{}\n",
            report.analysis.gas.efficiency
        ));

        out.push_str("\nkind,severity,description,recommendation\n");
        for finding in &report.analysis.vulnerabilities {
            out.push_str(&format!(
                "{},{},{},{}\n",
                finding.kind,
                finding.severity,
                csv_escape(&finding.description),
                csv_escape(&finding.recommendation)
            ));
        }

        out.push_str("\naccess_control_flag,value\n");
        let access = &report.analysis.access_control;
        out.push_str(&format!("has_owner,{}\n", access.has_owner));
        out.push_str(&format!("has_multisig,{}\n", access.has_multisig));
        out.push_str(&format!("has_timelock,{}\n", access.has_timelock));
        for risk in &access.risks {
            out.push_str(&format!("risk,{}\n", csv_escape(risk)));
        }

        if !report.analysis.gas.recommendations.is_empty() {
            out.push_str("\ngas_recommendation\n");
            for rec in &report.analysis.gas.recommendations {
                out.push_str(&format!("{}\n", csv_escape(rec)));
            }
        }
        out
    }

    fn to_html(report: &SecurityReport) -> String {
        let analysis = &report.analysis;
        let mut findings_html = String::new();
        for finding in &analysis.vulnerabilities {
            findings_html.push_str(&format!(
                "<tr><td>{}</td><td style=\"color:{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
                finding.kind,
                severity_hex(finding.severity),
                finding.severity,
                html_escape(&finding.description),
                html_escape(&finding.recommendation)
            ));
        }

        let mut access_html = String::new();
        for (label, value) in [
            ("Owner", analysis.access_control.has_owner),
            ("Multisig", analysis.access_control.has_multisig),
            ("Timelock", analysis.access_control.has_timelock),
        ] {
            access_html.push_str(&format!(
                "<li>{label}: {}</li>\n",
                if value { "present" } else { "absent" }
            ));
        }
        for risk in &analysis.access_control.risks {
            access_html.push_str(&format!("<li class=\"risk\">{}</li>\n", html_escape(risk)));
        }

        let mut gas_html = String::new();
        for rec in &analysis.gas.recommendations {
            gas_html.push_str(&format!("<li>{}</li>\n", html_escape(rec)));
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Security Report {address}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; color: #222; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
.banner {{ padding: 1rem; border-radius: 6px; color: #fff; background: {risk_color}; }}
.risk {{ color: #b00020; }}
</style>
</head>
<body>
<h1>Contract Security Report</h1>
<p><strong>Address:</strong> {address}<br>
<strong>Contract:</strong> {name}<br>
<strong>Verified source:</strong> {verified}</p>
<div class="banner"><strong>Risk level: {risk}</strong> (score {score}/100)</div>
<h2>Findings ({finding_count})</h2>
<table>
<tr><th>Kind</th><th>Severity</th><th>Description</th><th>Recommendation</th></tr>
{findings}
</table>
<h2>Access Control</h2>
<ul>
{access}
</ul>
<h2>Gas Efficiency: {gas_efficiency}/100</h2>
<ul>
{gas}
</ul>
<p><em>Generated by kensa {version}</em></p>
</body>
</html>
"#,
            address = html_escape(&report.contract.address),
            name = html_escape(report.contract.contract_name.as_deref().unwrap_or("unknown")),
            verified = report.contract.is_verified,
            risk = analysis.risk_level,
            risk_color = risk_hex(analysis.risk_level),
            score = analysis.score,
            finding_count = analysis.vulnerabilities.len(),
            findings = findings_html,
            access = access_html,
            gas_efficiency = analysis.gas.efficiency,
            gas = gas_html,
            version = crate::VERSION,
        )
    }
}

fn severity_hex(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "#b00020",
        Severity::High => "#e65100",
        Severity::Medium => "#f9a825",
        Severity::Low => "#2e7d32",
    }
}

fn risk_hex(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Critical => "#b00020",
        RiskLevel::High => "#e65100",
        RiskLevel::Medium => "#f9a825",
        RiskLevel::Low => "#2e7d32",
    }
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
