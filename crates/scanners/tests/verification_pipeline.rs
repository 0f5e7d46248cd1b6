//! End-to-end verification runs over a stubbed chain source.

use async_trait::async_trait;
use kensa_scanners::fetch::ExplorerSource;
use kensa_scanners::{
    ChainSource, Error, RiskLevel, StepKind, VerificationStep, Verifier, VulnerabilityKind,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const VULNERABLE_WALLET: &str = r#"
pragma solidity ^0.6.0;

contract VulnerableWallet {
    mapping(address => uint256) public balances;

    function deposit() public payable {
        balances[msg.sender] += msg.value;
    }

    function withdraw(uint256 amount) public {
        (bool success, ) = msg.sender.call{value: amount}("");
        balances[msg.sender] = 0;
    }
}
"#;

struct ScriptedSource {
    calls: Arc<AtomicUsize>,
    code: String,
    explorer: ExplorerBehavior,
}

enum ExplorerBehavior {
    Nothing,
    Fails,
    Verified(&'static str),
}

#[async_trait]
impl ChainSource for ScriptedSource {
    async fn code_at(&self, _address: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.clone())
    }

    async fn source_for(&self, _address: &str) -> Result<Option<ExplorerSource>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.explorer {
            ExplorerBehavior::Nothing => Ok(None),
            ExplorerBehavior::Fails => Err(Error::Network("explorer unreachable".into())),
            ExplorerBehavior::Verified(source) => Ok(Some(ExplorerSource {
                contract_name: "VulnerableWallet".into(),
                compiler: "v0.6.12".into(),
                source_code: source.into(),
                abi_raw: "[]".into(),
            })),
        }
    }
}

fn valid_addr() -> String {
    format!("0x{}", "12".repeat(20))
}

#[tokio::test]
async fn invalid_address_fails_before_any_network_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut verifier = Verifier::with_source(Box::new(ScriptedSource {
        calls: calls.clone(),
        code: "0x6080".into(),
        explorer: ExplorerBehavior::Nothing,
    }));

    let err = verifier.verify("not-an-address").await.unwrap_err();
    assert!(matches!(err, Error::InvalidAddress(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0, "network must not be touched");
}

#[tokio::test]
async fn empty_code_ends_the_run_with_no_contract() {
    let mut verifier = Verifier::with_source(Box::new(ScriptedSource {
        calls: Arc::new(AtomicUsize::new(0)),
        code: "0x".into(),
        explorer: ExplorerBehavior::Nothing,
    }));

    let err = verifier.verify(&valid_addr()).await.unwrap_err();
    assert!(matches!(err, Error::NoContractAtAddress(_)));

    let error_steps: Vec<&VerificationStep> = verifier
        .steps()
        .iter()
        .filter(|s| s.kind == StepKind::Error)
        .collect();
    assert_eq!(error_steps.len(), 1);
}

#[tokio::test]
async fn explorer_failure_does_not_block_the_pipeline() {
    let mut verifier = Verifier::with_source(Box::new(ScriptedSource {
        calls: Arc::new(AtomicUsize::new(0)),
        code: "0x6080604052".into(),
        explorer: ExplorerBehavior::Fails,
    }));

    let report = verifier.verify(&valid_addr()).await.unwrap();
    assert!(!report.contract.is_verified);
    assert!(report
        .steps
        .iter()
        .any(|s| s.kind == StepKind::Warn && s.message.contains("Explorer lookup failed")));
}

#[tokio::test]
async fn verified_vulnerable_contract_is_rated_critical() {
    let mut verifier = Verifier::with_source(Box::new(ScriptedSource {
        calls: Arc::new(AtomicUsize::new(0)),
        code: "0x6080604052".into(),
        explorer: ExplorerBehavior::Verified(VULNERABLE_WALLET),
    }));

    let report = verifier.verify(&valid_addr()).await.unwrap();
    println!(
        "[pipeline] risk={} score={} findings={}",
        report.analysis.risk_level,
        report.analysis.score,
        report.analysis.vulnerabilities.len()
    );

    assert_eq!(report.analysis.risk_level, RiskLevel::Critical);

    let critical: Vec<_> = report
        .analysis
        .vulnerabilities
        .iter()
        .filter(|f| f.kind == VulnerabilityKind::PotentialReentrancy)
        .collect();
    assert_eq!(critical.len(), 1, "exactly one reentrancy finding");

    // Score must agree with the severity counts by construction.
    let counts = report.analysis.count_by_severity();
    let expected = (100i32
        - 30 * counts.critical as i32
        - 20 * counts.high as i32
        - 10 * counts.medium as i32)
        .max(0) as u8;
    assert_eq!(report.analysis.score, expected);
}

#[tokio::test]
async fn bytecode_findings_precede_source_findings() {
    // Delegatecall-heavy bytecode plus vulnerable source: the bytecode
    // finding must come first in the merged list.
    let mut verifier = Verifier::with_source(Box::new(ScriptedSource {
        calls: Arc::new(AtomicUsize::new(0)),
        code: "0x60f461f460f4".into(),
        explorer: ExplorerBehavior::Verified(VULNERABLE_WALLET),
    }));

    let report = verifier.verify(&valid_addr()).await.unwrap();
    let kinds: Vec<_> = report
        .analysis
        .vulnerabilities
        .iter()
        .map(|f| f.kind)
        .collect();

    let delegatecall = kinds
        .iter()
        .position(|k| *k == VulnerabilityKind::DelegatecallUsage)
        .expect("bytecode finding present");
    let reentrancy = kinds
        .iter()
        .position(|k| *k == VulnerabilityKind::PotentialReentrancy)
        .expect("source finding present");
    assert!(delegatecall < reentrancy);
}
