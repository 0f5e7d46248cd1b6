//! Structural heuristics over raw deployed bytecode.
//!
//! Every check is a small independent [`Check`] over the normalized hex
//! string; the analyzer runs the whole list unconditionally, in a fixed
//! order, so a given blob always yields the same ordered findings.

pub mod patterns;

use crate::core::{Check, Finding, Severity, VulnerabilityKind};

pub struct BytecodeAnalyzer {
    checks: Vec<Box<dyn Check>>,
}

impl BytecodeAnalyzer {
    pub fn new() -> Self {
        // Emission order is a contract; do not reorder.
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(DelegatecallCheck),
            Box::new(SelfdestructCheck),
            Box::new(CallDensityCheck),
            Box::new(Create2Check),
            Box::new(CodeSizeCheck),
            Box::new(MinimalProxyCheck),
            Box::new(ExtcodecopyCheck),
            Box::new(StorageDensityCheck),
        ];
        Self { checks }
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    /// Pure scan of one bytecode blob. Accepts the node's hex verbatim
    /// (`0x`-prefixed or not, any case).
    pub fn analyze(&self, bytecode: &str) -> Vec<Finding> {
        let code = patterns::normalize(bytecode);
        self.checks.iter().flat_map(|c| c.scan(&code)).collect()
    }
}

impl Default for BytecodeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

struct DelegatecallCheck;

impl Check for DelegatecallCheck {
    fn id(&self) -> &'static str {
        "bytecode-delegatecall"
    }

    fn name(&self) -> &'static str {
        "Delegatecall usage"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        let hits = patterns::count_any(code, patterns::DELEGATECALL_IN_CONTEXT);
        if hits == 0 {
            return Vec::new();
        }
        let severity = if hits > 2 {
            Severity::High
        } else {
            Severity::Medium
        };
        vec![Finding::new(
            VulnerabilityKind::DelegatecallUsage,
            severity,
            format!("Found {hits} delegatecall site(s) executing foreign code in this contract's storage context"),
            "Verify every delegatecall target is trusted and immutable; prefer audited proxy patterns",
        )]
    }
}

struct SelfdestructCheck;

impl Check for SelfdestructCheck {
    fn id(&self) -> &'static str {
        "bytecode-selfdestruct"
    }

    fn name(&self) -> &'static str {
        "Selfdestruct present"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        if patterns::count_any(code, patterns::SELFDESTRUCT_IN_CONTEXT) == 0 {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::SelfdestructPresent,
            Severity::High,
            "Contract contains a reachable selfdestruct instruction",
            "Remove selfdestruct or gate it behind strict, timelocked governance",
        )]
    }
}

struct CallDensityCheck;

impl Check for CallDensityCheck {
    fn id(&self) -> &'static str {
        "bytecode-call-density"
    }

    fn name(&self) -> &'static str {
        "External call density"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        let hits = patterns::count_any(code, patterns::CALL_IN_CONTEXT);
        let severity = if hits > 10 {
            Severity::High
        } else if hits > 5 {
            Severity::Medium
        } else {
            return Vec::new();
        };
        vec![Finding::new(
            VulnerabilityKind::HighExternalCallCount,
            severity,
            format!("High density of external CALL sites ({hits}); large external surface"),
            "Audit each external interaction and apply checks-effects-interactions throughout",
        )]
    }
}

struct Create2Check;

impl Check for Create2Check {
    fn id(&self) -> &'static str {
        "bytecode-create2"
    }

    fn name(&self) -> &'static str {
        "CREATE2 presence"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        // Raw byte-value match, unqualified by context (see patterns.rs).
        if patterns::count(code, patterns::CREATE2) == 0 {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::Create2Usage,
            Severity::Low,
            "CREATE2 opcode byte present; contract may deploy to precomputed addresses",
            "Review factory logic; CREATE2 redeployment can change code behind a stable address",
        )]
    }
}

struct CodeSizeCheck;

impl Check for CodeSizeCheck {
    fn id(&self) -> &'static str {
        "bytecode-code-size"
    }

    fn name(&self) -> &'static str {
        "Contract size"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        let size = patterns::byte_len(code);
        let severity = if size > patterns::MAX_CODE_SIZE {
            Severity::High
        } else if size > patterns::LARGE_CODE_SIZE {
            Severity::Medium
        } else {
            return Vec::new();
        };
        vec![Finding::new(
            VulnerabilityKind::LargeContractSize,
            severity,
            format!(
                "Deployed code is {size} bytes (EIP-170 ceiling is {})",
                patterns::MAX_CODE_SIZE
            ),
            "Split the contract into libraries or modules to reduce deployed size",
        )]
    }
}

struct MinimalProxyCheck;

impl Check for MinimalProxyCheck {
    fn id(&self) -> &'static str {
        "bytecode-minimal-proxy"
    }

    fn name(&self) -> &'static str {
        "EIP-1167 minimal proxy"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        if !patterns::is_minimal_proxy(code) {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::MinimalProxyPattern,
            Severity::Low,
            "Contract is an EIP-1167 minimal proxy forwarding all calls to a fixed implementation",
            "Analyze the implementation contract; the proxy itself carries no logic",
        )]
    }
}

struct ExtcodecopyCheck;

impl Check for ExtcodecopyCheck {
    fn id(&self) -> &'static str {
        "bytecode-extcodecopy"
    }

    fn name(&self) -> &'static str {
        "External code copy"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        let hits = patterns::count(code, patterns::EXTCODECOPY);
        if hits <= 1 {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::ExternalCodeCopy,
            Severity::Medium,
            format!("EXTCODECOPY byte appears {hits} times; contract inspects or copies foreign code"),
            "Confirm copied code is validated; external code can change between inspection and use",
        )]
    }
}

struct StorageDensityCheck;

impl Check for StorageDensityCheck {
    fn id(&self) -> &'static str {
        "bytecode-storage-density"
    }

    fn name(&self) -> &'static str {
        "Storage operation density"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn scan(&self, code: &str) -> Vec<Finding> {
        let stores = patterns::count(code, patterns::SSTORE);
        let loads = patterns::count(code, patterns::SLOAD);
        if stores <= 20 && loads <= 30 {
            return Vec::new();
        }
        vec![Finding::new(
            VulnerabilityKind::HeavyStorageUse,
            Severity::Low,
            format!("Dense storage traffic ({stores} SSTORE / {loads} SLOAD sites)"),
            "Batch storage writes and cache reads in memory to reduce gas costs",
        )]
    }
}
