//! Wallet service configuration.
use crate::{
    chains::ChainKind,
    constants::{
        DEFAULT_ESCROW_FEE_PERCENT, DEFAULT_METRICS_PORT, DEFAULT_PORT,
        DEFAULT_RPC_DEFAULT_MAX_CONNECTIONS,
    },
    types::{Token, WalletType},
};
use alloy::primitives::{Address, address};
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    net::{IpAddr, Ipv4Addr},
    path::Path,
};
use url::Url;

/// The canonical v0.6 entrypoint deployment.
pub const ENTRYPOINT_V06: Address = address!("0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789");

/// Wallet service configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WalletsConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Chain configurations.
    #[serde(default)]
    pub chains: BTreeMap<ChainKind, ChainConfig>,
    /// Escrow configuration.
    #[serde(default)]
    pub escrow: EscrowConfig,
    /// Secrets.
    #[serde(skip_serializing, default)]
    pub secrets: SecretsConfig,
}

impl WalletsConfig {
    /// Sets the IP address to serve the RPC on.
    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.server.address = address;
        self
    }

    /// Sets the port to serve the RPC on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Sets the port to serve the metrics on.
    pub fn with_metrics_port(mut self, port: u16) -> Self {
        self.server.metrics_port = port;
        self
    }

    /// Sets the maximum number of concurrent connections the service can handle.
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.server.max_connections = max_connections;
        self
    }

    /// Adds or replaces a chain.
    pub fn with_chain(mut self, chain: ChainKind, config: ChainConfig) -> Self {
        self.chains.insert(chain, config);
        self
    }

    /// Sets the RPC endpoint of an already configured chain.
    pub fn with_endpoint(mut self, chain: ChainKind, endpoint: Option<Url>) -> Self {
        if let Some(endpoint) = endpoint
            && let Some(config) = self.chains.get_mut(&chain)
        {
            config.endpoint = endpoint;
        }
        self
    }

    /// Sets the platform share of escrow settlements.
    pub fn with_escrow_fee_percent(mut self, fee_percent: Option<u8>) -> Self {
        if let Some(fee_percent) = fee_percent {
            self.escrow.fee_percent = fee_percent;
        }
        self
    }

    /// Sets the recipient of escrow fees.
    pub fn with_fee_recipient(mut self, fee_recipient: Option<Address>) -> Self {
        self.escrow.fee_recipient = fee_recipient.or(self.escrow.fee_recipient);
        self
    }

    /// Sets the platform key. Either a private key or an AWS KMS key id.
    pub fn with_platform_key(mut self, platform_key: Option<String>) -> Self {
        if let Some(platform_key) = platform_key {
            self.secrets.platform_key = platform_key;
        }
        self
    }

    /// Checks the configuration for values that would make every request fail.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.escrow.fee_percent > 100 {
            eyre::bail!("escrow fee percent must be at most 100, got {}", self.escrow.fee_percent);
        }

        for (chain, config) in &self.chains {
            if config.tokens.is_empty() {
                eyre::bail!("chain {chain} has no tokens configured");
            }
        }

        Ok(())
    }

    /// Reads the configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read wallets config at {}", path.display()))?;
        serde_yaml::from_str(&yaml)
            .wrap_err_with(|| format!("invalid wallets config at {}", path.display()))
    }

    /// Writes the configuration to a YAML file. Secrets are left out.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, serde_yaml::to_string(self)?)
            .wrap_err_with(|| format!("could not write wallets config to {}", path.display()))
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address to serve the RPC on.
    pub address: IpAddr,
    /// The port to serve the RPC on.
    pub port: u16,
    /// The port to serve the metrics on.
    pub metrics_port: u16,
    /// The maximum number of concurrent connections the service can handle.
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            max_connections: DEFAULT_RPC_DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Chain configuration for individual chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// The RPC endpoint of the chain.
    pub endpoint: Url,
    /// The bundler endpoint. Defaults to [`Self::endpoint`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundler: Option<Url>,
    /// The v0.6 entrypoint.
    #[serde(default = "default_entrypoint")]
    pub entrypoint: Address,
    /// The account factory.
    pub factory: Address,
    /// The paymaster sponsoring operations, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster: Option<Address>,
    /// Tokens by wallet type.
    #[serde(default)]
    pub tokens: BTreeMap<WalletType, Token>,
}

fn default_entrypoint() -> Address {
    ENTRYPOINT_V06
}

/// Escrow configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Share of a settled balance retained by the platform, in percent.
    pub fee_percent: u8,
    /// Recipient of the platform share. Defaults to the platform signer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_recipient: Option<Address>,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self { fee_percent: DEFAULT_ESCROW_FEE_PERCENT, fee_recipient: None }
    }
}

/// Secrets (kept out of serialized output).
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsConfig {
    /// The platform signer, either a private key or an AWS KMS key id.
    pub platform_key: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            platform_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .to_string(),
        }
    }
}
