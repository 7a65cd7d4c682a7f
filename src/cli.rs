//! # Wallets CLI
use crate::{
    chains::ChainKind,
    config::WalletsConfig,
    constants::{DEFAULT_METRICS_PORT, DEFAULT_PORT, DEFAULT_RPC_DEFAULT_MAX_CONNECTIONS},
    spawn::try_spawn_with_args,
};
use alloy::primitives::Address;
use clap::Parser;
use eyre::OptionExt;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};
use url::Url;

/// Custodial quorum smart accounts over ERC-4337 bundlers.
#[derive(Debug, Parser)]
#[command(author, about = "Quorum wallets", long_about = None)]
pub struct Args {
    /// The configuration file.
    ///
    /// If missing, a default one will be used and stored in the working directory under
    /// `wallets.yaml`.
    #[arg(long, value_name = "CONFIG", env = "WALLETS_CONFIG", default_value = "wallets.yaml")]
    pub config: PathBuf,
    /// The address to serve the RPC on.
    #[arg(long = "http.addr", value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,
    /// The port to serve the RPC on.
    #[arg(long = "http.port", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// The port to serve the metrics on.
    #[arg(long = "http.metrics-port", value_name = "PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,
    /// The maximum number of concurrent connections the service can handle.
    #[arg(long = "max-connections", value_name = "NUM", default_value_t = DEFAULT_RPC_DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
    /// Overrides the RPC endpoint of a configured chain, in a format of "chain:url".
    #[arg(long = "endpoint", value_name = "CHAIN:RPC_ENDPOINT", value_parser = parse_chain_url)]
    pub endpoints: Vec<(ChainKind, Url)>,
    /// Share of a settled escrow balance retained by the platform, in percent.
    #[arg(long = "escrow-fee-percent", value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub escrow_fee_percent: Option<u8>,
    /// Recipient of escrow fees. Defaults to the platform signer.
    #[arg(long = "fee-recipient", value_name = "ADDRESS")]
    pub fee_recipient: Option<Address>,
    /// The platform signer, either a private key or an AWS KMS key id.
    #[arg(long = "platform-key", value_name = "KEY", env = "WALLETS_PLATFORM_KEY")]
    pub platform_key: Option<String>,
}

impl Args {
    /// Run the wallet service.
    pub async fn run(self) -> eyre::Result<()> {
        let config_path = self.config.clone();
        try_spawn_with_args(self, &config_path).await?.server.stopped().await;

        Ok(())
    }

    /// Merges [`Args`] values into an existing [`WalletsConfig`] instance.
    pub fn merge_wallets_config(self, config: WalletsConfig) -> WalletsConfig {
        let config = self
            .endpoints
            .into_iter()
            .fold(config, |config, (chain, url)| config.with_endpoint(chain, Some(url)));

        config
            .with_address(self.address)
            .with_port(self.port)
            .with_metrics_port(self.metrics_port)
            .with_max_connections(self.max_connections)
            .with_escrow_fee_percent(self.escrow_fee_percent)
            .with_fee_recipient(self.fee_recipient)
            .with_platform_key(self.platform_key)
    }
}

/// Parses a pair of chain and url in a format of "chain:url".
fn parse_chain_url(arg: &str) -> eyre::Result<(ChainKind, Url)> {
    let (chain, url) = arg.split_once(':').ok_or_eyre("expected chain:url argument")?;

    Ok((chain.parse()?, url.parse()?))
}
