//! Wallet creation and listing.

use crate::e2e::{CHAIN, Environment, USDC, USDT};
use alloy::primitives::{Address, Bytes};
use quorum_wallets::{
    chains::ChainKind,
    error::WalletError,
    storage::StorageApi,
    types::{
        OwnerId,
        rpc::{CreateWalletParameters, Transfer, TransferBatchParameters, TransferParameters},
    },
};

#[tokio::test(flavor = "multi_thread")]
async fn create_and_list() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    let usdt = Address::repeat_byte(0x11);
    let usdc = Address::repeat_byte(0x12);

    let created = env.create_wallet("alice", "usdc", usdc).await?;
    assert_eq!(created.address, usdc);
    env.create_wallet("alice", "USDT", usdt).await?;

    let wallets = env.wallets.wallets(&OwnerId::from("alice")).await?;
    assert_eq!(wallets.len(), 2);
    assert!(wallets.iter().all(|wallet| wallet.chain == CHAIN));
    assert_eq!(
        wallets.iter().map(|wallet| wallet.wallet_type.as_str()).collect::<Vec<_>>(),
        ["usdc", "usdt"]
    );

    let owner = OwnerId::from("alice");
    let record = env.wallets.storage().read_wallet_by_address(&owner, &usdt).await?.unwrap();
    assert_eq!(record.token.address, USDT);
    let record = env.wallets.storage().read_wallet(&owner, CHAIN, &"usdc".into()).await?.unwrap();
    assert_eq!(record.token.address, USDC);

    // wallets are scoped to their owner
    assert!(env.wallets.wallets(&OwnerId::from("bob")).await?.is_empty());

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn salts_are_deterministic() -> eyre::Result<()> {
    let first = Environment::setup().await?.create_wallet("alice", "usdt", Address::ZERO).await?;
    let second = Environment::setup().await?.create_wallet("alice", "usdt", Address::ZERO).await?;
    assert_eq!(first.salt, second.salt);

    let other = Environment::setup().await?.create_wallet("bob", "usdt", Address::ZERO).await?;
    assert_ne!(first.salt, other.salt);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn wallet_exists() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    env.create_wallet("alice", "usdt", Address::repeat_byte(0x11)).await?;

    // the existing wallet is detected before deriving an address
    let err = env
        .wallets
        .create_wallet(
            &OwnerId::from("alice"),
            CreateWalletParameters { chain: CHAIN, wallet_type: "usdt".into() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::WalletExists { chain: CHAIN, .. }));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unsupported_chain_and_type() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    let owner = OwnerId::from("alice");

    let err = env
        .wallets
        .create_wallet(
            &owner,
            CreateWalletParameters { chain: ChainKind::Polygon, wallet_type: "usdt".into() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::UnsupportedChain(ChainKind::Polygon)));

    let err = env
        .wallets
        .create_wallet(&owner, CreateWalletParameters { chain: CHAIN, wallet_type: "dai".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::UnknownWalletType(CHAIN, _)));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn transfers_need_ownership() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    let wallet = Address::repeat_byte(0x11);
    env.create_wallet("alice", "usdt", wallet).await?;

    let err = env
        .wallets
        .transfer(
            &OwnerId::from("mallory"),
            TransferParameters {
                wallet_address: wallet,
                transfer: Transfer { to_address: Address::repeat_byte(2), amount: "1".into() },
                signatures: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::NotOwner(address) if address == wallet));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_malformed_requests() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    let wallet = Address::repeat_byte(0x11);
    env.create_wallet("alice", "usdt", wallet).await?;
    let owner = OwnerId::from("alice");

    let err = env
        .wallets
        .transfer_batch(
            &owner,
            TransferBatchParameters {
                wallet_address: wallet,
                transactions: vec![],
                signatures: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::EmptyBatch));

    let err = env
        .wallets
        .transfer(
            &owner,
            TransferParameters {
                wallet_address: wallet,
                transfer: Transfer { to_address: Address::repeat_byte(2), amount: "1".into() },
                signatures: Some(Bytes::from(vec![1u8; 100])),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidSignatureLength(100)));

    Ok(())
}
