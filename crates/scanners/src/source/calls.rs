//! Low-level call hygiene: unchecked return values and raw value transfers.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use regex::Regex;

pub struct UncheckedCallCheck {
    require_wrapped: Regex,
}

impl UncheckedCallCheck {
    pub fn new() -> Self {
        Self {
            // A call whose result feeds straight into require().
            require_wrapped: Regex::new(r"require\s*\([^)]*call").expect("static regex"),
        }
    }
}

impl Check for UncheckedCallCheck {
    fn id(&self) -> &'static str {
        "source-unchecked-call"
    }

    fn name(&self) -> &'static str {
        "Unchecked low-level call"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let count = source.matches(".call(").count() + source.matches(".delegatecall(").count();
        if count == 0 {
            return Vec::new();
        }
        if self.require_wrapped.is_match(source) || source.contains("(bool success,") {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::UncheckedLowLevelCall,
            Severity::High,
            format!("{count} low-level call(s) whose success value is never checked"),
            "Capture and check the boolean result: (bool success, ) = target.call(...); require(success)",
        )]
    }
}

pub struct RawValueTransferCheck {
    call_with_value: Regex,
}

impl RawValueTransferCheck {
    pub fn new() -> Self {
        Self {
            call_with_value: Regex::new(r"\.call\{\s*value\s*:").expect("static regex"),
        }
    }
}

impl Check for RawValueTransferCheck {
    fn id(&self) -> &'static str {
        "source-raw-value-transfer"
    }

    fn name(&self) -> &'static str {
        "Raw value transfer via call"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        if !self.call_with_value.is_match(source) && !source.contains(".call.value(") {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::RawValueTransfer,
            Severity::High,
            "Ether is forwarded through a raw call with value, handing full gas to the recipient",
            "Prefer pull-payment patterns; if pushing, guard the call site against reentrancy",
        )]
    }
}
