//! Wallet service spawn utilities.
use crate::{
    chains::{ChainKind, ChainProfile, ChainRegistry},
    cli::Args,
    config::{ChainConfig, WalletsConfig},
    metrics,
    rpc::{WalletApiServer, WalletRpc},
    service::{EscrowSettings, Wallets},
    signers::{DynSigner, SignatureCoordinator},
    storage::WalletStorage,
};
use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::client::ClientBuilder,
};
use eyre::WrapErr;
use http::header;
use itertools::Itertools;
use jsonrpsee::server::{Server, ServerConfig, ServerHandle};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::Path};
use tower::ServiceBuilder;
use tower_http::cors::{AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;
use url::Url;

/// Context returned once the wallet service is launched.
#[derive(Debug, Clone)]
pub struct WalletsHandle {
    /// The socket address to which the server is bound.
    pub local_addr: SocketAddr,
    /// Handle to RPC server.
    pub server: ServerHandle,
    /// Configured chains.
    pub chains: ChainRegistry,
    /// Storage of the service.
    pub storage: WalletStorage,
    /// Metrics collector handle.
    pub metrics: PrometheusHandle,
}

/// Attempts to spawn the wallet service using CLI arguments and a configuration file.
///
/// A default configuration is written to `config_path` if it does not exist.
pub async fn try_spawn_with_args<P: AsRef<Path>>(
    args: Args,
    config_path: P,
) -> eyre::Result<WalletsHandle> {
    let config = if !config_path.as_ref().exists() {
        let config = args.merge_wallets_config(WalletsConfig::default());
        config.save_to_file(&config_path)?;
        config
    } else {
        // File exists: load and override with CLI values.
        args.merge_wallets_config(WalletsConfig::load_from_file(&config_path)?)
    };

    try_spawn(config).await
}

/// Spawns the wallet service using the provided [`WalletsConfig`].
pub async fn try_spawn(config: WalletsConfig) -> eyre::Result<WalletsHandle> {
    config.validate()?;

    info!("Using in-memory storage.");
    let storage = WalletStorage::in_memory();

    let signer = DynSigner::load(&config.secrets.platform_key, None).await?;
    let platform = signer.address();

    let metrics = metrics::setup_exporter((config.server.address, config.server.metrics_port))?;

    let profiles = futures_util::future::try_join_all(
        config.chains.iter().map(|(kind, chain)| connect_chain(*kind, chain)),
    )
    .await?;
    let chains = ChainRegistry::new(profiles);

    let escrow = EscrowSettings {
        fee_percent: config.escrow.fee_percent,
        fee_recipient: config.escrow.fee_recipient.unwrap_or(platform),
    };
    let wallets =
        Wallets::new(chains.clone(), storage.clone(), SignatureCoordinator::new(signer), escrow);
    let rpc = WalletRpc::new(wallets).into_rpc();

    // http layers
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::any())
        .allow_origin(AllowOrigin::any())
        .allow_headers([header::CONTENT_TYPE]);

    // start server
    let server_config = ServerConfig::builder()
        .max_connections(config.server.max_connections)
        .http_only()
        .build();
    let server = Server::builder()
        .set_config(server_config)
        .set_http_middleware(ServiceBuilder::new().layer(cors))
        .build((config.server.address, config.server.port))
        .await?;
    let addr = server.local_addr()?;
    info!(%addr, "Started wallet service");
    info!("Chains: {}", chains.kinds().sorted().join(", "));
    info!("Platform signer: {}", platform);
    info!(
        fee_percent = escrow.fee_percent,
        fee_recipient = %escrow.fee_recipient,
        "Escrow settings"
    );

    Ok(WalletsHandle { local_addr: addr, server: server.start(rpc), chains, storage, metrics })
}

/// Connects to the node and bundler of a chain, checking the node serves the expected chain.
async fn connect_chain(kind: ChainKind, config: &ChainConfig) -> eyre::Result<ChainProfile> {
    let provider = connect(&config.endpoint).await?;
    let bundler = match &config.bundler {
        Some(url) => Some(connect(url).await?),
        None => None,
    };

    let chain_id = provider
        .get_chain_id()
        .await
        .wrap_err_with(|| format!("failed to fetch chain id of {kind}"))?;
    if chain_id != kind.id() {
        eyre::bail!("endpoint of {kind} serves chain {chain_id}, expected {}", kind.id());
    }

    Ok(ChainProfile::new(kind, config, provider, bundler))
}

async fn connect(url: &Url) -> eyre::Result<DynProvider> {
    let client = ClientBuilder::default()
        .connect(url.as_str())
        .await
        .wrap_err_with(|| format!("failed to connect to {url}"))?;
    Ok(ProviderBuilder::new().connect_client(client).erased())
}
