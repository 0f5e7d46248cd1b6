//! Inline assembly blocks and legacy language constructs.

use crate::core::{Check, Finding, Severity, VulnerabilityKind};
use regex::Regex;

const DANGEROUS_IN_ASSEMBLY: &[&str] = &["selfdestruct", "delegatecall", "callcode"];

pub struct InlineAssemblyCheck;

impl InlineAssemblyCheck {
    pub fn new() -> Self {
        Self
    }

    /// Extract each `assembly { ... }` block by brace matching from the
    /// keyword onward. Unterminated blocks run to end of input.
    fn assembly_blocks(source: &str) -> Vec<&str> {
        let mut blocks = Vec::new();
        let mut search_from = 0;

        while let Some(rel) = source[search_from..].find("assembly") {
            let kw = search_from + rel;
            let after = &source[kw..];
            if let Some(open) = after.find('{') {
                let mut depth = 0usize;
                let mut end = after.len();
                for (i, c) in after[open..].char_indices() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = open + i + 1;
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                blocks.push(&after[..end]);
                search_from = kw + end;
            } else {
                break;
            }
        }
        blocks
    }
}

impl Check for InlineAssemblyCheck {
    fn id(&self) -> &'static str {
        "source-inline-assembly"
    }

    fn name(&self) -> &'static str {
        "Inline assembly"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let blocks = Self::assembly_blocks(source);
        if blocks.is_empty() {
            return Vec::new();
        }
        let dangerous = blocks
            .iter()
            .any(|b| DANGEROUS_IN_ASSEMBLY.iter().any(|k| b.contains(k)));

        let (severity, description) = if dangerous {
            (
                Severity::High,
                "Inline assembly containing selfdestruct/delegatecall-class operations".to_string(),
            )
        } else {
            (
                Severity::Medium,
                format!("{} inline assembly block(s) bypass compiler safety checks", blocks.len()),
            )
        };
        vec![Finding::new(
            VulnerabilityKind::InlineAssembly,
            severity,
            description,
            "Minimize assembly usage; document and review each block individually",
        )]
    }
}

pub struct DeprecatedConstructsCheck {
    bare_throw: Regex,
}

impl DeprecatedConstructsCheck {
    pub fn new() -> Self {
        Self {
            bare_throw: Regex::new(r"\bthrow\b").expect("static regex"),
        }
    }
}

impl Check for DeprecatedConstructsCheck {
    fn id(&self) -> &'static str {
        "source-deprecated"
    }

    fn name(&self) -> &'static str {
        "Deprecated constructs"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn scan(&self, source: &str) -> Vec<Finding> {
        let mut legacy = Vec::new();
        if source.contains("suicide(") {
            legacy.push("suicide -> selfdestruct");
        }
        if source.contains("sha3(") {
            legacy.push("sha3 -> keccak256");
        }
        if self.bare_throw.is_match(source) {
            legacy.push("throw -> revert");
        }
        if legacy.is_empty() {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::DeprecatedConstructs,
            Severity::Medium,
            format!("Deprecated constructs in use: {}", legacy.join(", ")),
            "Replace legacy keywords with their modern equivalents",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_assembly_is_medium() {
        let src = r#"
function chainId() public view returns (uint256 id) {
    assembly {
        id := chainid()
    }
}
"#;
        let findings = InlineAssemblyCheck::new().scan(src);
        assert_eq!(findings[0].kind, VulnerabilityKind::InlineAssembly);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn dangerous_assembly_is_high() {
        let src = r#"
function destroy(address target) public {
    assembly {
        let ok := delegatecall(gas(), target, 0, 0, 0, 0)
    }
}
"#;
        let findings = InlineAssemblyCheck::new().scan(src);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn dangerous_keyword_outside_block_stays_medium() {
        let src = r#"
function f(address t) public {
    assembly { let x := 1 }
}
// delegatecall mentioned only in a comment far from the block
"#;
        let findings = InlineAssemblyCheck::new().scan(src);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn finds_all_legacy_forms() {
        let src = "if (bad) throw; bytes32 h = sha3(data); suicide(owner);";
        let findings = DeprecatedConstructsCheck::new().scan(src);
        assert_eq!(findings.len(), 1);
        for expected in ["selfdestruct", "keccak256", "revert"] {
            assert!(findings[0].description.contains(expected));
        }
    }

    #[test]
    fn modern_source_is_clean() {
        let src = "revert InvalidState(); bytes32 h = keccak256(data);";
        assert!(DeprecatedConstructsCheck::new().scan(src).is_empty());
    }
}
