use crate::core::{Finding, Severity};

/// One independent heuristic applied over a raw text input.
///
/// Bytecode checks receive the normalized (lowercase, prefix-stripped) hex
/// string; source checks receive the verified source text verbatim. Checks
/// are pure: same input, same ordered findings, no I/O, no shared state.
/// Each analyzer composes its checks in a fixed list, and that list order
/// is the emission-order contract downstream consumers rely on.
pub trait Check: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// The worst severity this check can emit, for listings.
    fn severity(&self) -> Severity;

    fn scan(&self, input: &str) -> Vec<Finding>;
}
