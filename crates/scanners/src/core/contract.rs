use serde::{Deserialize, Serialize};

/// Identity and raw material for one analysis run.
///
/// Constructed once per verification by the fetcher and never mutated
/// afterwards; both analyzers borrow it read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Checksummed or plain 0x-prefixed 40-hex-char account address.
    pub address: String,
    /// Deployed code hex exactly as returned by the node.
    pub bytecode: String,
    /// Whether an explorer-style service had source on file.
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<serde_json::Value>,
}

impl ContractInfo {
    pub fn source(&self) -> Option<&str> {
        self.source_code.as_deref()
    }

    /// Deployed code size in bytes (hex length halved, prefix excluded).
    pub fn code_size(&self) -> usize {
        self.bytecode.trim_start_matches("0x").len() / 2
    }
}

/// Strict address-shape check, applied before any network call is attempted.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
