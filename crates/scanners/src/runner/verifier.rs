//! The verification run: fetch, scan, aggregate, with an ordered step log.

use crate::bytecode::BytecodeAnalyzer;
use crate::core::{ContractInfo, Finding, SecurityAnalysis};
use crate::error::Error;
use crate::fetch::{ChainSource, ContractFetcher, NetworkConfig};
use crate::risk::{count_severities, RiskAggregator};
use crate::runner::steps::VerificationStep;
use crate::source::SourceAnalyzer;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Where a run currently stands. `Errored` absorbs from every prior state;
/// the two scan states never run out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    Idle,
    Fetching,
    BytecodeScan,
    SourceScan,
    Aggregating,
    Complete,
    Errored,
}

/// Terminal payload of a successful run. Everything an exporter or UI
/// needs is in here; no further network access is required downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityReport {
    pub contract: ContractInfo,
    pub analysis: SecurityAnalysis,
    pub steps: Vec<VerificationStep>,
}

/// Sequences one verification at a time. A new call to [`Verifier::verify`]
/// replaces the previous run's log and state wholesale; dropping the future
/// cancels the in-flight network call, since the run holds no detached
/// tasks.
pub struct Verifier {
    fetcher: ContractFetcher,
    bytecode: BytecodeAnalyzer,
    source: SourceAnalyzer,
    state: VerificationState,
    steps: Vec<VerificationStep>,
}

impl Verifier {
    pub fn new(config: NetworkConfig) -> Self {
        Self::with_fetcher(ContractFetcher::new(config))
    }

    /// Build over an arbitrary chain source, the test seam.
    pub fn with_source(source: Box<dyn ChainSource>) -> Self {
        Self::with_fetcher(ContractFetcher::with_source(source))
    }

    fn with_fetcher(fetcher: ContractFetcher) -> Self {
        Self {
            fetcher,
            bytecode: BytecodeAnalyzer::new(),
            source: SourceAnalyzer::new(),
            state: VerificationState::Idle,
            steps: Vec::new(),
        }
    }

    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// The step log of the current (or last) run. Available after a failed
    /// run too, so an error is self-explaining; for an abandoned run the
    /// log is simply truncated at the point of cancellation.
    pub fn steps(&self) -> &[VerificationStep] {
        &self.steps
    }

    /// Run the full pipeline for one address. All-or-nothing: on error no
    /// partial result is returned, only the step log remains.
    pub async fn verify(&mut self, address: &str) -> Result<SecurityReport, Error> {
        self.steps.clear();

        self.transition(VerificationState::Fetching);
        self.push(VerificationStep::info(format!(
            "Fetching deployed code for {address}"
        )));

        let fetched = match self.fetcher.fetch(address).await {
            Ok(fetched) => fetched,
            Err(e) => return Err(self.fail(e)),
        };
        for warning in &fetched.warnings {
            self.push(VerificationStep::warn(warning.clone()));
        }
        let contract = fetched.info;
        self.push(VerificationStep::success(format!(
            "Retrieved {} bytes of deployed code",
            contract.code_size()
        )));
        if contract.is_verified {
            self.push(VerificationStep::success(format!(
                "Verified source on file: {} ({})",
                contract.contract_name.as_deref().unwrap_or("unnamed"),
                contract.compiler.as_deref().unwrap_or("unknown compiler"),
            )));
        } else {
            self.push(VerificationStep::info(
                "No verified source available; source heuristics will be skipped",
            ));
        }

        self.transition(VerificationState::BytecodeScan);
        self.push(VerificationStep::info("Scanning bytecode patterns"));
        let mut findings = self.bytecode.analyze(&contract.bytecode);
        self.push(summary_step("Bytecode scan", &findings));

        self.transition(VerificationState::SourceScan);
        let source_findings = match contract.source() {
            Some(text) => {
                self.push(VerificationStep::info("Scanning verified source"));
                let source_findings = self.source.analyze(text);
                self.push(summary_step("Source scan", &source_findings));
                source_findings
            }
            None => Vec::new(),
        };
        findings.extend(source_findings);

        self.transition(VerificationState::Aggregating);
        self.push(VerificationStep::info("Aggregating findings"));
        let analysis = RiskAggregator::analyze(findings, contract.source());
        self.push(VerificationStep::success(format!(
            "Risk level {}, score {}/100",
            analysis.risk_level, analysis.score
        )));

        self.transition(VerificationState::Complete);
        Ok(SecurityReport {
            contract,
            analysis,
            steps: self.steps.clone(),
        })
    }

    fn transition(&mut self, next: VerificationState) {
        info!(from = ?self.state, to = ?next, "verification state change");
        self.state = next;
    }

    fn push(&mut self, step: VerificationStep) {
        self.steps.push(step);
    }

    fn fail(&mut self, error: Error) -> Error {
        self.push(VerificationStep::error(error.to_string()));
        self.transition(VerificationState::Errored);
        error
    }
}

fn summary_step(stage: &str, findings: &[Finding]) -> VerificationStep {
    if findings.is_empty() {
        return VerificationStep::success(format!("{stage}: no findings"));
    }
    let counts = count_severities(findings);
    VerificationStep::warn(format!(
        "{stage}: {} finding(s) ({} critical, {} high, {} medium, {} low)",
        counts.total(),
        counts.critical,
        counts.high,
        counts.medium,
        counts.low
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::steps::StepKind;
    use async_trait::async_trait;

    struct StubSource {
        code: &'static str,
    }

    #[async_trait]
    impl ChainSource for StubSource {
        async fn code_at(&self, _address: &str) -> Result<String, Error> {
            Ok(self.code.to_string())
        }

        async fn source_for(
            &self,
            _address: &str,
        ) -> Result<Option<crate::fetch::ExplorerSource>, Error> {
            Ok(None)
        }
    }

    fn valid_addr() -> String {
        format!("0x{}", "cd".repeat(20))
    }

    #[tokio::test]
    async fn completed_run_walks_every_state() {
        let mut verifier = Verifier::with_source(Box::new(StubSource { code: "0x6080" }));
        assert_eq!(verifier.state(), VerificationState::Idle);

        let report = verifier.verify(&valid_addr()).await.unwrap();
        assert_eq!(verifier.state(), VerificationState::Complete);
        assert!(!report.steps.is_empty());
        assert_eq!(report.contract.bytecode, "0x6080");
    }

    #[tokio::test]
    async fn failed_run_keeps_its_step_log() {
        let mut verifier = Verifier::with_source(Box::new(StubSource { code: "0x" }));

        let err = verifier.verify(&valid_addr()).await.unwrap_err();
        assert!(matches!(err, Error::NoContractAtAddress(_)));
        assert_eq!(verifier.state(), VerificationState::Errored);

        let last = verifier.steps().last().unwrap();
        assert_eq!(last.kind, StepKind::Error);
    }

    #[tokio::test]
    async fn new_run_replaces_the_previous_log() {
        let mut verifier = Verifier::with_source(Box::new(StubSource { code: "0x6080" }));
        verifier.verify(&valid_addr()).await.unwrap();
        let first_len = verifier.steps().len();

        verifier.verify(&valid_addr()).await.unwrap();
        assert_eq!(verifier.steps().len(), first_len);
    }
}
