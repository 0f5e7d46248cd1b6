//! Contract retrieval: one bounded get-code call, one best-effort explorer
//! lookup, and the immutable [`ContractInfo`] both analyzers consume.

pub mod config;
pub mod explorer;
pub mod rpc;

pub use config::NetworkConfig;
pub use explorer::ExplorerSource;

use crate::core::{is_valid_address, ContractInfo};
use crate::error::Error;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Seam between the fetcher and the network. The HTTP implementation is the
/// production path; tests substitute recording or failing sources.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Deployed code hex for an address, `"0x"` when nothing is deployed.
    async fn code_at(&self, address: &str) -> Result<String, Error>;

    /// Verified source metadata, `Ok(None)` when the explorer has nothing
    /// on file or no credentials were configured.
    async fn source_for(&self, address: &str) -> Result<Option<ExplorerSource>, Error>;
}

pub struct HttpChainSource {
    client: reqwest::Client,
    config: NetworkConfig,
}

impl HttpChainSource {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChainSource for HttpChainSource {
    async fn code_at(&self, address: &str) -> Result<String, Error> {
        let request = rpc::RpcRequest::get_code(address);
        let send = self.client.post(&self.config.rpc_url).json(&request).send();

        let response = tokio::time::timeout(self.config.rpc_timeout, send)
            .await
            .map_err(|_| Error::Timeout(self.config.rpc_timeout))?
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let envelope: rpc::RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("malformed rpc response: {e}")))?;
        rpc::code_from_response(envelope)
    }

    async fn source_for(&self, address: &str) -> Result<Option<ExplorerSource>, Error> {
        let Some(api_key) = self.config.explorer_api_key.as_deref() else {
            debug!(network = %self.config.network, "no explorer api key; skipping source lookup");
            return Ok(None);
        };

        let send = self
            .client
            .get(&self.config.explorer_url)
            .query(&[
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", address),
                ("apikey", api_key),
            ])
            .send();

        let response = tokio::time::timeout(self.config.explorer_timeout, send)
            .await
            .map_err(|_| Error::Timeout(self.config.explorer_timeout))?
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "explorer returned HTTP {}",
                response.status()
            )));
        }

        let envelope: explorer::ExplorerEnvelope = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("malformed explorer response: {e}")))?;
        Ok(explorer::source_from_envelope(envelope))
    }
}

/// A fetched contract plus any non-fatal degradations encountered on the
/// way; the orchestrator surfaces each warning as a step.
#[derive(Debug)]
pub struct FetchedContract {
    pub info: ContractInfo,
    pub warnings: Vec<String>,
}

pub struct ContractFetcher {
    source: Box<dyn ChainSource>,
}

impl ContractFetcher {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            source: Box::new(HttpChainSource::new(config)),
        }
    }

    /// Build a fetcher over any [`ChainSource`], the test seam.
    pub fn with_source(source: Box<dyn ChainSource>) -> Self {
        Self { source }
    }

    /// Retrieve everything the analyzers need for one address.
    ///
    /// Address validation happens before any network traffic. The get-code
    /// call is fatal on failure; the explorer lookup never is.
    pub async fn fetch(&self, address: &str) -> Result<FetchedContract, Error> {
        if !is_valid_address(address) {
            return Err(Error::InvalidAddress(address.to_string()));
        }

        let bytecode = self.source.code_at(address).await?;
        let stripped = bytecode.trim_start_matches("0x");
        if stripped.is_empty() {
            return Err(Error::NoContractAtAddress(address.to_string()));
        }
        let code_bytes = hex::decode(stripped)
            .map_err(|e| Error::Network(format!("node returned malformed code hex: {e}")))?;
        debug!(address, bytes = code_bytes.len(), "fetched deployed code");

        let mut info = ContractInfo {
            address: address.to_string(),
            bytecode,
            is_verified: false,
            ..Default::default()
        };
        let mut warnings = Vec::new();

        match self.source.source_for(address).await {
            Ok(Some(explorer_source)) => {
                info.is_verified = true;
                info.contract_name = Some(explorer_source.contract_name);
                info.compiler = Some(explorer_source.compiler);
                info.source_code = Some(explorer_source.source_code);
                info.abi = match serde_json::from_str(&explorer_source.abi_raw) {
                    Ok(abi) => Some(abi),
                    Err(e) => {
                        warn!(address, error = %e, "explorer ABI failed to parse; dropping it");
                        warnings
                            .push("Explorer metadata incomplete: ABI could not be parsed".into());
                        None
                    }
                };
            }
            Ok(None) => {}
            Err(e) => {
                warn!(address, error = %e, "explorer lookup failed; continuing without source");
                warnings.push(format!(
                    "Explorer lookup failed ({e}); continuing with bytecode-only analysis"
                ));
            }
        }

        Ok(FetchedContract { info, warnings })
    }
}
