//! Version-aware arithmetic safety and pragma hygiene.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use crate::source::version;

pub struct UncheckedArithmeticCheck;

impl UncheckedArithmeticCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for UncheckedArithmeticCheck {
    fn id(&self) -> &'static str {
        "source-unchecked-arithmetic"
    }

    fn name(&self) -> &'static str {
        "Unchecked arithmetic"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let Some(declared) = version::parse_pragma(source) else {
            return Vec::new();
        };
        if declared.has_builtin_overflow_checks() || source.contains("SafeMath") {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::UncheckedArithmetic,
            Severity::Critical,
            format!(
                "Compiler {}.{}.{} wraps on overflow and no SafeMath usage was found",
                declared.major, declared.minor, declared.patch
            ),
            "Upgrade to Solidity >= 0.8.0 or route arithmetic through SafeMath",
        )]
    }
}

pub struct FloatingPragmaCheck;

impl FloatingPragmaCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for FloatingPragmaCheck {
    fn id(&self) -> &'static str {
        "source-floating-pragma"
    }

    fn name(&self) -> &'static str {
        "Floating version pragma"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        if !version::is_floating(source) {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::FloatingPragma,
            Severity::Low,
            "Version pragma floats; different builds may compile with different compilers",
            "Pin an exact compiler version for reproducible deployments",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_08_without_safemath_is_critical() {
        let src = "pragma solidity ^0.6.12;\ncontract T { uint256 x; }";
        let findings = UncheckedArithmeticCheck::new().scan(src);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, VulnerabilityKind::UncheckedArithmetic);
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn safemath_marker_suppresses_finding() {
        let src = "pragma solidity ^0.6.12;\nusing SafeMath for uint256;";
        assert!(UncheckedArithmeticCheck::new().scan(src).is_empty());
    }

    #[test]
    fn modern_compiler_is_clean() {
        let src = "pragma solidity 0.8.19;\ncontract T {}";
        assert!(UncheckedArithmeticCheck::new().scan(src).is_empty());
    }

    #[test]
    fn floating_pragma_is_low() {
        assert_eq!(
            FloatingPragmaCheck::new().scan("pragma solidity ^0.8.0;")[0].severity,
            Severity::Low
        );
        assert!(FloatingPragmaCheck::new()
            .scan("pragma solidity 0.8.19;")
            .is_empty());
    }
}
