//! Textual heuristics over verified source.
//!
//! No AST is ever built: each check is an independent predicate over the
//! raw text, and the analyzer applies the full fixed list whenever source
//! is present. The checks are deliberately overlapping weak signals, so a
//! single contract routinely trips several of them.

pub mod arithmetic;
pub mod assembly;
pub mod authorization;
pub mod calls;
pub mod environment;
pub mod hygiene;
pub mod reentrancy;
pub mod version;

pub use arithmetic::{FloatingPragmaCheck, UncheckedArithmeticCheck};
pub use assembly::{DeprecatedConstructsCheck, InlineAssemblyCheck};
pub use authorization::{AccessControlCheck, TxOriginCheck};
pub use calls::{RawValueTransferCheck, UncheckedCallCheck};
pub use environment::TimestampCheck;
pub use hygiene::{HardcodedAddressCheck, MissingEventsCheck};
pub use reentrancy::ReentrancyCheck;
pub use version::{parse_pragma, SolidityVersion};

use crate::core::{Check, Finding};

pub struct SourceAnalyzer {
    checks: Vec<Box<dyn Check>>,
}

impl SourceAnalyzer {
    pub fn new() -> Self {
        // Emission order is a contract; do not reorder.
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(ReentrancyCheck::new()),
            Box::new(UncheckedCallCheck::new()),
            Box::new(TxOriginCheck::new()),
            Box::new(TimestampCheck::new()),
            Box::new(UncheckedArithmeticCheck::new()),
            Box::new(AccessControlCheck::new()),
            Box::new(HardcodedAddressCheck::new()),
            Box::new(InlineAssemblyCheck::new()),
            Box::new(DeprecatedConstructsCheck::new()),
            Box::new(MissingEventsCheck::new()),
            Box::new(FloatingPragmaCheck::new()),
            Box::new(RawValueTransferCheck::new()),
        ];
        Self { checks }
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    /// Pure scan of one source text; every check runs, none short-circuits
    /// another.
    pub fn analyze(&self, source: &str) -> Vec<Finding> {
        self.checks.iter().flat_map(|c| c.scan(source)).collect()
    }
}

impl Default for SourceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Does this line look like a write to contract state?
///
/// Local declarations are excluded, comparison operators are excluded, and
/// the left-hand side must look like a storage lvalue: a mapping/array
/// index, a member access that is not a builtin namespace, or a bare
/// lowercase identifier.
pub(crate) fn is_state_assignment(line: &str) -> bool {
    let trimmed = line.trim_start();
    for decl in ["uint", "int", "address ", "bool ", "bytes", "string "] {
        if trimmed.starts_with(decl) {
            return false;
        }
    }

    if !line.contains('=')
        || line.contains("==")
        || line.contains("!=")
        || line.contains(">=")
        || line.contains("<=")
        || line.contains("=>")
    {
        return false;
    }

    let left = match line.split('=').next() {
        Some(l) => l.trim().trim_end_matches(['+', '-', '*', '/']).trim_end(),
        None => return false,
    };

    if left.contains('[') && left.contains(']') {
        return true;
    }

    if left.contains('.')
        && !left.starts_with("msg.")
        && !left.starts_with("block.")
        && !left.starts_with("tx.")
    {
        return true;
    }

    if !left.contains('.') && !left.contains('[') && !left.contains('(') {
        return left
            .chars()
            .next()
            .map(|c| c.is_lowercase())
            .unwrap_or(false);
    }

    false
}
