//! Block-environment dependence: timestamp-sensitive logic.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use regex::Regex;

pub struct TimestampCheck {
    timestamp: Regex,
    conditional: Regex,
}

impl TimestampCheck {
    pub fn new() -> Self {
        Self {
            // `now` was the pre-0.7 alias for block.timestamp.
            timestamp: Regex::new(r"block\.timestamp|\bnow\b").expect("static regex"),
            conditional: Regex::new(r"\bif\b|\brequire\b|\bwhile\b").expect("static regex"),
        }
    }

    fn line_compares(line: &str) -> bool {
        line.contains('<') || line.contains('>') || line.contains(" - ")
    }
}

impl Check for TimestampCheck {
    fn id(&self) -> &'static str {
        "source-timestamp"
    }

    fn name(&self) -> &'static str {
        "Timestamp dependence"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let mut count = 0usize;
        let mut in_condition = false;

        for line in source.lines() {
            if !self.timestamp.is_match(line) {
                continue;
            }
            count += 1;
            if self.conditional.is_match(line) && Self::line_compares(line) {
                in_condition = true;
            }
        }

        if count == 0 {
            return Vec::new();
        }

        let severity = if in_condition {
            Severity::High
        } else {
            Severity::Medium
        };
        vec![Finding::new(
            VulnerabilityKind::TimestampDependence,
            severity,
            format!("block.timestamp used on {count} line(s); validators can skew it by several seconds"),
            "Avoid timestamp comparisons for critical logic; use block numbers or external time oracles",
        )]
    }
}
