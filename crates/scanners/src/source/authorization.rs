//! Authorization heuristics: tx.origin authentication and missing access
//! control on state-changing entry points.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use regex::Regex;

pub struct TxOriginCheck;

impl TxOriginCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for TxOriginCheck {
    fn id(&self) -> &'static str {
        "source-tx-origin"
    }

    fn name(&self) -> &'static str {
        "tx.origin usage"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let count = source.matches("tx.origin").count();
        if count == 0 {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::TxOriginUsage,
            Severity::High,
            format!("tx.origin referenced {count} time(s); phishing contracts can satisfy origin checks"),
            "Authenticate with msg.sender instead of tx.origin",
        )]
    }
}

/// Markers treated as evidence of some privilege-restriction scheme.
const ACCESS_MARKERS: &[&str] = &[
    "onlyOwner",
    "Ownable",
    "AccessControl",
    "onlyRole",
    "modifier only",
];

pub struct AccessControlCheck {
    declaration: Regex,
}

impl AccessControlCheck {
    pub fn new() -> Self {
        Self {
            // Function header from the name through its attribute list,
            // stopping at the body or a bodiless semicolon.
            declaration: Regex::new(r"function\s+[A-Za-z0-9_]+\s*\([^)]*\)[^{;]*")
                .expect("static regex"),
        }
    }

    fn has_open_mutating_function(&self, source: &str) -> bool {
        self.declaration.find_iter(source).any(|m| {
            let header = m.as_str();
            (header.contains("public") || header.contains("external"))
                && !header.contains("view")
                && !header.contains("pure")
        })
    }
}

impl Check for AccessControlCheck {
    fn id(&self) -> &'static str {
        "source-access-control"
    }

    fn name(&self) -> &'static str {
        "Missing access control"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        if ACCESS_MARKERS.iter().any(|m| source.contains(m)) {
            return Vec::new();
        }
        if !self.has_open_mutating_function(source) {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::MissingAccessControl,
            Severity::High,
            "State-changing public functions found with no ownership or role scheme anywhere in the contract",
            "Restrict privileged entry points with Ownable or role-based modifiers",
        )]
    }
}
