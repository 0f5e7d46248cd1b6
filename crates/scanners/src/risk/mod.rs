//! Deterministic aggregation of findings into the final verdict.
//!
//! The score and risk level are pure functions of the severity multiset
//! (no weighting by kind, no deduplication), so the same findings always
//! produce the same verdict. Gas efficiency and the access-control summary
//! are independent of the risk math.

use crate::core::{
    AccessControlAnalysis, Finding, GasAnalysis, RiskLevel, SecurityAnalysis, Severity,
    SeverityCount,
};

const BASE_SCORE: i32 = 100;
const CRITICAL_WEIGHT: i32 = 30;
const HIGH_WEIGHT: i32 = 20;
const MEDIUM_WEIGHT: i32 = 10;

const BASE_GAS_EFFICIENCY: i32 = 80;

pub struct RiskAggregator;

impl RiskAggregator {
    /// Risk level and score from the severity counts. Low findings are
    /// listed but carry no weight.
    pub fn aggregate(findings: &[Finding]) -> (RiskLevel, u8) {
        let counts = count_severities(findings);

        let risk_level = if counts.critical > 0 {
            RiskLevel::Critical
        } else if counts.high > 0 {
            RiskLevel::High
        } else if counts.medium > 0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let score = BASE_SCORE
            - CRITICAL_WEIGHT * counts.critical as i32
            - HIGH_WEIGHT * counts.high as i32
            - MEDIUM_WEIGHT * counts.medium as i32;

        (risk_level, score.max(0) as u8)
    }

    /// Keyword-penalty gas estimate; only evaluated against source text.
    pub fn gas_analysis(source: Option<&str>) -> GasAnalysis {
        let mut efficiency = BASE_GAS_EFFICIENCY;
        let mut recommendations = Vec::new();

        if let Some(text) = source {
            if text.contains("memory") && text.contains("storage") {
                efficiency -= 5;
                recommendations.push(
                    "Review data-location choices; copying between memory and storage is a common gas sink".to_string(),
                );
            }
            if text.contains("string") && !text.contains("bytes") {
                efficiency -= 3;
                recommendations
                    .push("Prefer bytes32 over string for fixed-size data".to_string());
            }
            if text.contains("require(") && !text.contains("error ") {
                efficiency -= 2;
                recommendations.push(
                    "Use custom errors instead of require strings to cut deployment and revert costs".to_string(),
                );
            }
        }

        GasAnalysis {
            efficiency: efficiency.max(0) as u8,
            recommendations,
        }
    }

    /// Keyword-presence summary of the privilege structure. Without source
    /// text nothing can be asserted, so everything stays false with no
    /// risks listed.
    pub fn access_control(source: Option<&str>) -> AccessControlAnalysis {
        let Some(text) = source else {
            return AccessControlAnalysis::default();
        };

        let has_owner = text.contains("owner") || text.contains("Ownable");
        let has_multisig = text.contains("multisig") || text.contains("MultiSig");
        let has_timelock = text.contains("timelock") || text.contains("TimeLock");

        let mut risks = Vec::new();
        if has_owner && !has_multisig {
            risks.push(
                "Single-owner control without a multisig: one compromised key controls the contract".to_string(),
            );
        }
        if has_owner && !has_timelock {
            risks.push(
                "Privileged actions are not timelocked: owner changes take effect immediately".to_string(),
            );
        }

        AccessControlAnalysis {
            has_owner,
            has_multisig,
            has_timelock,
            risks,
        }
    }

    /// Assemble the full verdict from the merged finding list and the
    /// source text (when verified).
    pub fn analyze(findings: Vec<Finding>, source: Option<&str>) -> SecurityAnalysis {
        let (risk_level, score) = Self::aggregate(&findings);
        SecurityAnalysis {
            risk_level,
            score,
            vulnerabilities: findings,
            gas: Self::gas_analysis(source),
            access_control: Self::access_control(source),
        }
    }
}

pub fn count_severities(findings: &[Finding]) -> SeverityCount {
    let mut counts = SeverityCount::default();
    for finding in findings {
        match finding.severity {
            Severity::Critical => counts.critical += 1,
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low => counts.low += 1,
        }
    }
    counts
}
