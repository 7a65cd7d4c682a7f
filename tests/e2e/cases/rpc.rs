//! The `wallet_` namespace over HTTP.

use crate::e2e::{CHAIN, Environment};
use alloy::primitives::{Address, B256};
use jsonrpsee::{
    core::client::Error,
    http_client::HttpClientBuilder,
    server::{Server, ServerHandle},
    types::error::INVALID_PARAMS_CODE,
};
use quorum_wallets::{
    config::WalletsConfig,
    rpc::{WalletApiClient, WalletApiServer, WalletRpc},
    spawn::try_spawn,
    types::{
        OwnerId,
        rpc::{CreateWalletParameters, Transfer, TransferParameters},
    },
};

async fn serve(env: &Environment) -> eyre::Result<(String, ServerHandle)> {
    let server = Server::builder().build("127.0.0.1:0").await?;
    let url = format!("http://{}", server.local_addr()?);
    let handle = server.start(WalletRpc::new(env.wallets.clone()).into_rpc());
    Ok((url, handle))
}

#[tokio::test(flavor = "multi_thread")]
async fn wallet_namespace() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    let (url, _handle) = serve(&env).await?;
    let client = HttpClientBuilder::default().build(url)?;

    assert_eq!(client.health().await?, env!("CARGO_PKG_VERSION"));

    let wallet = Address::repeat_byte(0x11);
    env.push_sender_address(wallet);
    let created = client
        .create_wallet(
            OwnerId::from("alice"),
            CreateWalletParameters { chain: CHAIN, wallet_type: "usdt".into() },
        )
        .await?;
    assert_eq!(created.address, wallet);

    let wallets = client.get_wallets(OwnerId::from("alice")).await?;
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].salt, created.salt);

    // unknown operations are `null`
    env.asserter.push_success(&serde_json::Value::Null);
    assert!(client.get_operation(CHAIN, B256::ZERO).await?.is_none());

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn caller_errors_are_invalid_params() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    let (url, _handle) = serve(&env).await?;
    let client = HttpClientBuilder::default().build(url)?;

    let err = client
        .transfer(
            OwnerId::from("mallory"),
            TransferParameters {
                wallet_address: Address::repeat_byte(0x11),
                transfer: Transfer { to_address: Address::ZERO, amount: "1".into() },
                signatures: None,
            },
        )
        .await
        .unwrap_err();

    let Error::Call(err) = err else { panic!("expected a call error, got {err:?}") };
    assert_eq!(err.code(), INVALID_PARAMS_CODE);
    assert!(err.message().contains("you do not own"));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn spawned_service_serves_http() -> eyre::Result<()> {
    let config =
        WalletsConfig::default().with_port(0).with_metrics_port(0).with_max_connections(4);
    let handle = try_spawn(config).await?;
    assert_ne!(handle.local_addr.port(), 0);

    let client = HttpClientBuilder::default().build(format!("http://{}", handle.local_addr))?;
    assert_eq!(client.health().await?, env!("CARGO_PKG_VERSION"));
    assert!(client.get_wallets(OwnerId::from("alice")).await?.is_empty());

    handle.server.stop()?;
    Ok(())
}
