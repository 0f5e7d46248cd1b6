//! Explorer "get source code" envelope types.
//!
//! The explorer is strictly best-effort: every failure mode here degrades
//! to bytecode-only analysis instead of failing the run.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExplorerEnvelope {
    pub status: String,
    #[allow(dead_code)]
    pub message: String,
    #[serde(default)]
    pub result: Vec<ExplorerItem>,
}

#[derive(Debug, Deserialize)]
pub struct ExplorerItem {
    #[serde(rename = "SourceCode", default)]
    pub source_code: String,
    #[serde(rename = "ContractName", default)]
    pub contract_name: String,
    #[serde(rename = "CompilerVersion", default)]
    pub compiler_version: String,
    #[serde(rename = "ABI", default)]
    pub abi: String,
}

/// Verified-source payload as handed to the fetcher. `abi_raw` is still the
/// explorer's JSON-encoded string; parsing it is the fetcher's problem
/// because a parse failure must only drop the ABI, not the lookup.
#[derive(Debug, Clone)]
pub struct ExplorerSource {
    pub contract_name: String,
    pub compiler: String,
    pub source_code: String,
    pub abi_raw: String,
}

/// Interpret the envelope. `None` means "no verified source on file",
/// which callers treat as an ordinary unverified contract.
pub fn source_from_envelope(envelope: ExplorerEnvelope) -> Option<ExplorerSource> {
    if envelope.status != "1" {
        return None;
    }
    let item = envelope.result.into_iter().next()?;
    if item.source_code.is_empty() {
        return None;
    }
    Some(ExplorerSource {
        contract_name: item.contract_name,
        compiler: item.compiler_version,
        source_code: item.source_code,
        abi_raw: item.abi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_envelope_yields_source() {
        let json = r#"{
            "status": "1",
            "message": "OK",
            "result": [{
                "SourceCode": "contract A {}",
                "ContractName": "A",
                "CompilerVersion": "v0.8.19",
                "ABI": "[]"
            }]
        }"#;
        let envelope: ExplorerEnvelope = serde_json::from_str(json).unwrap();
        let source = source_from_envelope(envelope).unwrap();
        assert_eq!(source.contract_name, "A");
        assert_eq!(source.compiler, "v0.8.19");
    }

    #[test]
    fn unverified_contract_yields_none() {
        let json = r#"{
            "status": "1",
            "message": "OK",
            "result": [{
                "SourceCode": "",
                "ContractName": "",
                "CompilerVersion": "",
                "ABI": "Contract source code not verified"
            }]
        }"#;
        let envelope: ExplorerEnvelope = serde_json::from_str(json).unwrap();
        assert!(source_from_envelope(envelope).is_none());
    }

    #[test]
    fn error_status_yields_none() {
        let json = r#"{"status": "0", "message": "NOTOK", "result": []}"#;
        let envelope: ExplorerEnvelope = serde_json::from_str(json).unwrap();
        assert!(source_from_envelope(envelope).is_none());
    }
}
