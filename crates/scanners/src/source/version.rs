//! Pragma version extraction for version-aware checks.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidityVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SolidityVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_at_least(&self, major: u32, minor: u32, patch: u32) -> bool {
        match self.major.cmp(&major) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self.minor.cmp(&minor) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => self.patch >= patch,
            },
        }
    }

    /// Arithmetic wraps silently before 0.8.0.
    pub fn has_builtin_overflow_checks(&self) -> bool {
        self.is_at_least(0, 8, 0)
    }
}

/// The raw pragma statement text, up to the terminating semicolon.
pub fn pragma_statement(source: &str) -> Option<&str> {
    let start = source.find("pragma solidity")?;
    let rest = &source[start..];
    let end = rest.find(';')?;
    Some(&rest[..end])
}

/// Extract the first declared version from a pragma-like line, tolerating
/// range operators. `pragma solidity ^0.7.6;` parses as 0.7.6.
pub fn parse_pragma(source: &str) -> Option<SolidityVersion> {
    let pragma = pragma_statement(source)?;
    let constraint = pragma.trim_start_matches("pragma solidity").trim();
    parse_constraint(constraint)
}

/// Whether the pragma pins a range rather than an exact version.
pub fn is_floating(source: &str) -> bool {
    pragma_statement(source)
        .map(|p| p.contains(['^', '~', '>', '<']))
        .unwrap_or(false)
}

fn parse_constraint(constraint: &str) -> Option<SolidityVersion> {
    let cleaned = constraint
        .trim()
        .trim_start_matches('^')
        .trim_start_matches('~')
        .trim_start_matches(">=")
        .trim_start_matches("<=")
        .trim_start_matches('>')
        .trim_start_matches('<')
        .trim();

    let version_part = cleaned.split_whitespace().next()?;
    let mut parts = version_part.split('.');

    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

    Some(SolidityVersion::new(major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_and_caret_pragmas() {
        let src = "pragma solidity 0.8.19;\ncontract A {}";
        assert_eq!(parse_pragma(src), Some(SolidityVersion::new(0, 8, 19)));
        assert!(!is_floating(src));

        let caret = "pragma solidity ^0.7.6;";
        assert_eq!(parse_pragma(caret), Some(SolidityVersion::new(0, 7, 6)));
        assert!(is_floating(caret));
    }

    #[test]
    fn parses_range_pragmas() {
        let src = "pragma solidity >=0.6.0 <0.9.0;";
        assert_eq!(parse_pragma(src), Some(SolidityVersion::new(0, 6, 0)));
        assert!(is_floating(src));
    }

    #[test]
    fn missing_pragma_parses_to_none() {
        assert_eq!(parse_pragma("contract A {}"), None);
        assert!(!is_floating("contract A {}"));
    }

    #[test]
    fn overflow_protection_boundary() {
        assert!(SolidityVersion::new(0, 8, 0).has_builtin_overflow_checks());
        assert!(!SolidityVersion::new(0, 7, 6).has_builtin_overflow_checks());
    }
}
