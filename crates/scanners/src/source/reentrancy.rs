//! Line-scoped reentrancy heuristic.
//!
//! An explicit walk over lines rather than a single regex: the state is
//! "have I seen an external call since the last function boundary", reset
//! whenever a `function` keyword appears. A storage-looking assignment on a
//! later line while that flag is set is the classic call-then-write shape.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use crate::source::is_state_assignment;

const EXTERNAL_CALL_MARKERS: &[&str] = &[".call(", ".call{", ".send(", ".transfer("];
const GUARD_MARKERS: &[&str] = &["nonReentrant", "ReentrancyGuard"];

pub struct ReentrancyCheck;

impl ReentrancyCheck {
    pub fn new() -> Self {
        Self
    }

    fn is_external_call(line: &str) -> bool {
        EXTERNAL_CALL_MARKERS.iter().any(|m| line.contains(m))
    }
}

impl Check for ReentrancyCheck {
    fn id(&self) -> &'static str {
        "source-reentrancy"
    }

    fn name(&self) -> &'static str {
        "Reentrancy"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        if !EXTERNAL_CALL_MARKERS.iter().any(|m| source.contains(m)) {
            return Vec::new();
        }
        if GUARD_MARKERS.iter().any(|m| source.contains(m)) {
            return Vec::new();
        }

        let mut seen_call = false;
        let mut write_after_call = false;

        for line in source.lines() {
            if line.contains("function ") {
                seen_call = false;
            }
            if Self::is_external_call(line) {
                seen_call = true;
                continue;
            }
            if seen_call && is_state_assignment(line) {
                write_after_call = true;
                break;
            }
        }

        if write_after_call {
            vec![Finding::new(
                VulnerabilityKind::PotentialReentrancy,
                Severity::Critical,
                "External call is followed by a state write in the same function with no reentrancy guard",
                "Apply checks-effects-interactions: finalize state before the external call, or add a reentrancy guard",
            )]
        } else {
            vec![Finding::new(
                VulnerabilityKind::UnguardedExternalCall,
                Severity::Medium,
                "External call made without a reentrancy guard",
                "Add a reentrancy guard modifier to functions performing external calls",
            )]
        }
    }
}
