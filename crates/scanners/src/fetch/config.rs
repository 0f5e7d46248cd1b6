//! Per-network endpoint configuration.
//!
//! An explicit immutable value handed to the fetcher at construction, never
//! a module-level singleton, so analyzers for different networks can
//! coexist in one process and tests can point at stubs.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub network: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub explorer_api_key: Option<String>,
    /// Bound on the get-code RPC call.
    pub rpc_timeout: Duration,
    /// Tighter bound on the best-effort explorer lookup.
    pub explorer_timeout: Duration,
}

impl NetworkConfig {
    pub fn new(
        network: impl Into<String>,
        rpc_url: impl Into<String>,
        explorer_url: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            rpc_url: rpc_url.into(),
            explorer_url: explorer_url.into(),
            explorer_api_key: None,
            rpc_timeout: Duration::from_secs(10),
            explorer_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.explorer_api_key = Some(key.into());
        self
    }

    pub fn mainnet() -> Self {
        Self::new(
            "mainnet",
            "https://eth.llamarpc.com",
            "https://api.etherscan.io/api",
        )
    }

    pub fn sepolia() -> Self {
        Self::new(
            "sepolia",
            "https://rpc.sepolia.org",
            "https://api-sepolia.etherscan.io/api",
        )
    }

    pub fn polygon() -> Self {
        Self::new(
            "polygon",
            "https://polygon-rpc.com",
            "https://api.polygonscan.com/api",
        )
    }

    pub fn arbitrum() -> Self {
        Self::new(
            "arbitrum",
            "https://arb1.arbitrum.io/rpc",
            "https://api.arbiscan.io/api",
        )
    }

    /// Look up a named network; unknown names get etherscan-style URLs
    /// derived from the name.
    pub fn named(network: &str) -> Self {
        match network {
            "mainnet" => Self::mainnet(),
            "sepolia" => Self::sepolia(),
            "polygon" => Self::polygon(),
            "arbitrum" => Self::arbitrum(),
            other => Self::new(
                other,
                format!("https://rpc.{other}.org"),
                format!("https://api-{other}.etherscan.io/api"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_networks_resolve() {
        assert_eq!(NetworkConfig::named("polygon").network, "polygon");
        assert!(NetworkConfig::named("base").explorer_url.contains("base"));
    }

    #[test]
    fn default_timeouts_are_bounded() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.rpc_timeout, Duration::from_secs(10));
        assert!(config.explorer_timeout < config.rpc_timeout);
    }
}
