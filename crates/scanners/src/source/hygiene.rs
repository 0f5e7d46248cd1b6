//! Source hygiene: hardcoded addresses and silent state changes.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use crate::source::is_state_assignment;
use regex::Regex;
use std::collections::HashSet;

pub struct HardcodedAddressCheck {
    address: Regex,
}

impl HardcodedAddressCheck {
    pub fn new() -> Self {
        Self {
            address: Regex::new(r"\b0x[0-9a-fA-F]{40}\b").expect("static regex"),
        }
    }
}

impl Check for HardcodedAddressCheck {
    fn id(&self) -> &'static str {
        "source-hardcoded-addresses"
    }

    fn name(&self) -> &'static str {
        "Hardcoded addresses"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let distinct: HashSet<String> = self
            .address
            .find_iter(source)
            .map(|m| m.as_str().to_ascii_lowercase())
            .collect();
        if distinct.len() <= 3 {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::HardcodedAddresses,
            Severity::Medium,
            format!("{} distinct addresses hardcoded into the source", distinct.len()),
            "Inject addresses through the constructor or configuration so deployments stay portable",
        )]
    }
}

pub struct MissingEventsCheck;

impl MissingEventsCheck {
    pub fn new() -> Self {
        Self
    }

    fn mutates_state(source: &str) -> bool {
        source.lines().any(is_state_assignment)
            || source.contains(".push(")
            || source.contains(".pop(")
            || source.contains("delete ")
    }
}

impl Check for MissingEventsCheck {
    fn id(&self) -> &'static str {
        "source-missing-events"
    }

    fn name(&self) -> &'static str {
        "Missing events"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        if !Self::mutates_state(source) {
            return Vec::new();
        }
        if source.contains("event ") || source.contains("emit ") {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::MissingEvents,
            Severity::Low,
            "State changes occur but no events are declared or emitted",
            "Emit events on state transitions so off-chain consumers can track the contract",
        )]
    }
}
