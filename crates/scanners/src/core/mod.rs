//! Core types shared by every stage of the pipeline: the finding taxonomy,
//! severity ordering, the immutable per-run contract record, and the check
//! trait both analyzers build on.

pub mod check;
pub mod contract;
pub mod finding;
pub mod severity;

pub use check::Check;
pub use contract::{is_valid_address, ContractInfo};
pub use finding::{
    AccessControlAnalysis, Finding, GasAnalysis, SecurityAnalysis, SeverityCount, VulnerabilityKind,
};
pub use severity::{RiskLevel, Severity};
