//! Opcode-context patterns over raw hex text.
//!
//! This module is a deliberate approximation, not a disassembler. Patterns
//! are matched against the flat hex string without decoding instructions,
//! so PUSH immediates can coincide with an opcode byte and inflate a count.
//! The scoring thresholds downstream are calibrated against exactly this
//! behavior; swapping in a real decoder would change results, so the
//! approximation is isolated here and kept stable.

/// DELEGATECALL (0xf4) immediately preceded by PUSH1/PUSH2.
pub const DELEGATECALL_IN_CONTEXT: &[&str] = &["60f4", "61f4"];

/// SELFDESTRUCT (0xff) immediately preceded by a small push.
pub const SELFDESTRUCT_IN_CONTEXT: &[&str] = &["60ff", "61ff"];

/// CALL (0xf1) immediately preceded by PUSH1/PUSH2.
pub const CALL_IN_CONTEXT: &[&str] = &["60f1", "61f1"];

/// CREATE2 (0xf5), matched anywhere with no context qualification.
/// Known weak check: any `f5` nibble pair in push data also matches.
pub const CREATE2: &str = "f5";

/// EXTCODECOPY (0x3c).
pub const EXTCODECOPY: &str = "3c";

/// SLOAD (0x54) / SSTORE (0x55).
pub const SLOAD: &str = "54";
pub const SSTORE: &str = "55";

/// EIP-1167 minimal-proxy forwarder: prefix up to the pushed implementation
/// address, and the suffix after it.
pub const EIP1167_PREFIX: &str = "363d3d373d3d3d363d73";
pub const EIP1167_SUFFIX: &str = "5af43d82803e903d91602b57fd5bf3";

/// Deployed-code ceiling from EIP-170.
pub const MAX_CODE_SIZE: usize = 24_576;

/// Soft warning threshold below the hard ceiling.
pub const LARGE_CODE_SIZE: usize = 20_000;

/// Anything under this byte length that carries the forwarder bytes is
/// treated as a minimal proxy.
pub const MINIMAL_PROXY_MAX_BYTES: usize = 50;

/// Strip the `0x` prefix and lowercase, the one canonical form every
/// pattern above is written against.
pub fn normalize(bytecode: &str) -> String {
    bytecode.trim_start_matches("0x").to_ascii_lowercase()
}

/// Non-overlapping occurrence count of one hex pattern.
pub fn count(code: &str, pattern: &str) -> usize {
    code.matches(pattern).count()
}

/// Sum of non-overlapping occurrence counts across a pattern class.
pub fn count_any(code: &str, patterns: &[&str]) -> usize {
    patterns.iter().map(|p| count(code, p)).sum()
}

/// Code size in bytes for normalized hex.
pub fn byte_len(code: &str) -> usize {
    code.len() / 2
}

pub fn is_minimal_proxy(code: &str) -> bool {
    code.starts_with(EIP1167_PREFIX)
        && code.contains(EIP1167_SUFFIX)
        && byte_len(code) < MINIMAL_PROXY_MAX_BYTES
}
