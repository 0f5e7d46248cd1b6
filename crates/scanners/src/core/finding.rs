use crate::core::{RiskLevel, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed taxonomy of everything the heuristics can report.
///
/// Bytecode-derived and source-derived kinds overlap on purpose: both
/// analyzers may flag the same underlying issue from their own vantage
/// point, and the aggregate keeps both observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VulnerabilityKind {
    // Bytecode heuristics.
    DelegatecallUsage,
    SelfdestructPresent,
    HighExternalCallCount,
    Create2Usage,
    LargeContractSize,
    MinimalProxyPattern,
    ExternalCodeCopy,
    HeavyStorageUse,
    // Source heuristics.
    PotentialReentrancy,
    UnguardedExternalCall,
    UncheckedLowLevelCall,
    TxOriginUsage,
    TimestampDependence,
    UncheckedArithmetic,
    MissingAccessControl,
    HardcodedAddresses,
    InlineAssembly,
    DeprecatedConstructs,
    MissingEvents,
    FloatingPragma,
    RawValueTransfer,
}

impl fmt::Display for VulnerabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DelegatecallUsage => "DELEGATECALL_USAGE",
            Self::SelfdestructPresent => "SELFDESTRUCT_PRESENT",
            Self::HighExternalCallCount => "HIGH_EXTERNAL_CALL_COUNT",
            Self::Create2Usage => "CREATE2_USAGE",
            Self::LargeContractSize => "LARGE_CONTRACT_SIZE",
            Self::MinimalProxyPattern => "MINIMAL_PROXY_PATTERN",
            Self::ExternalCodeCopy => "EXTERNAL_CODE_COPY",
            Self::HeavyStorageUse => "HEAVY_STORAGE_USE",
            Self::PotentialReentrancy => "POTENTIAL_REENTRANCY",
            Self::UnguardedExternalCall => "UNGUARDED_EXTERNAL_CALL",
            Self::UncheckedLowLevelCall => "UNCHECKED_LOW_LEVEL_CALL",
            Self::TxOriginUsage => "TX_ORIGIN_USAGE",
            Self::TimestampDependence => "TIMESTAMP_DEPENDENCE",
            Self::UncheckedArithmetic => "UNCHECKED_ARITHMETIC",
            Self::MissingAccessControl => "MISSING_ACCESS_CONTROL",
            Self::HardcodedAddresses => "HARDCODED_ADDRESSES",
            Self::InlineAssembly => "INLINE_ASSEMBLY",
            Self::DeprecatedConstructs => "DEPRECATED_CONSTRUCTS",
            Self::MissingEvents => "MISSING_EVENTS",
            Self::FloatingPragma => "FLOATING_PRAGMA",
            Self::RawValueTransfer => "RAW_VALUE_TRANSFER",
        };
        f.write_str(label)
    }
}

/// One discrete heuristic observation. Immutable once created; findings are
/// collected in analyzer emission order and never deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: VulnerabilityKind,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

impl Finding {
    pub fn new(
        kind: VulnerabilityKind,
        severity: Severity,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// Gas-efficiency estimate, independent of the risk verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GasAnalysis {
    /// 0..=100, starts from a fixed base and only decreases.
    pub efficiency: u8,
    pub recommendations: Vec<String>,
}

/// Keyword-level summary of privilege structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessControlAnalysis {
    pub has_owner: bool,
    pub has_multisig: bool,
    pub has_timelock: bool,
    pub risks: Vec<String>,
}

/// The aggregate verdict for one contract.
///
/// `score` and `risk_level` are pure functions of the severity counts in
/// `vulnerabilities`; see [`crate::risk::RiskAggregator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAnalysis {
    pub risk_level: RiskLevel,
    pub score: u8,
    pub vulnerabilities: Vec<Finding>,
    pub gas: GasAnalysis,
    pub access_control: AccessControlAnalysis,
}

impl SecurityAnalysis {
    pub fn count_by_severity(&self) -> SeverityCount {
        let mut count = SeverityCount::default();
        for finding in &self.vulnerabilities {
            match finding.severity {
                Severity::Critical => count.critical += 1,
                Severity::High => count.high += 1,
                Severity::Medium => count.medium += 1,
                Severity::Low => count.low += 1,
            }
        }
        count
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCount {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCount {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&VulnerabilityKind::PotentialReentrancy).unwrap();
        assert_eq!(json, "\"POTENTIAL_REENTRANCY\"");
        assert_eq!(
            VulnerabilityKind::TxOriginUsage.to_string(),
            "TX_ORIGIN_USAGE"
        );
    }
}
