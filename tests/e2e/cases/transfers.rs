//! Token transfers out of quorum wallets.

use crate::e2e::Environment;
use alloy::primitives::{Address, B256, Bytes, U256, address};
use quorum_wallets::{
    error::{OperationError, WalletError},
    types::{
        OwnerId,
        rpc::{Transfer, TransferBatchParameters, TransferParameters},
    },
};

const WALLET: Address = address!("0x1111111111111111111111111111111111111111");

async fn alice() -> eyre::Result<Environment> {
    let env = Environment::setup().await?;
    env.create_wallet("alice", "usdt", WALLET).await?;
    Ok(env)
}

fn transfer(amount: &str) -> Transfer {
    Transfer { to_address: Address::repeat_byte(0x22), amount: amount.into() }
}

#[tokio::test(flavor = "multi_thread")]
async fn transfer_from_counterfactual_wallet() -> eyre::Result<()> {
    let env = alice().await?;
    let hash = B256::repeat_byte(0xaa);

    env.push_decimals();
    env.push_account(None);
    env.push_submission(0, hash);

    let submitted = env
        .wallets
        .transfer(
            &OwnerId::from("alice"),
            TransferParameters {
                wallet_address: WALLET,
                transfer: transfer("1.5"),
                signatures: None,
            },
        )
        .await?;
    assert_eq!(submitted.user_op_hash, hash);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cosigned_batch() -> eyre::Result<()> {
    let env = alice().await?;
    let hash = B256::repeat_byte(0xbb);

    env.push_decimals();
    env.push_account(Some(vec![env.platform, Address::repeat_byte(0x33)]));
    env.push_submission(3, hash);

    let submitted = env
        .wallets
        .transfer_batch(
            &OwnerId::from("alice"),
            TransferBatchParameters {
                wallet_address: WALLET,
                transactions: vec![transfer("1"), transfer("0.25")],
                signatures: Some(Bytes::from(vec![7u8; 65])),
            },
        )
        .await?;
    assert_eq!(submitted.user_op_hash, hash);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_amount() -> eyre::Result<()> {
    let env = alice().await?;

    env.push_decimals();
    let err = env
        .wallets
        .transfer(
            &OwnerId::from("alice"),
            TransferParameters {
                wallet_address: WALLET,
                transfer: transfer("0"),
                signatures: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount(_)));

    // one bad amount fails the whole batch
    env.push_decimals();
    let err = env
        .wallets
        .transfer_batch(
            &OwnerId::from("alice"),
            TransferBatchParameters {
                wallet_address: WALLET,
                transactions: vec![transfer("1"), transfer("one")],
                signatures: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount(_)));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_by_bundler() -> eyre::Result<()> {
    let env = alice().await?;

    env.push_decimals();
    env.push_account(None);
    env.push_abi(U256::ZERO);
    env.push_estimation();
    env.push_rejection("AA21 didn't pay prefund");

    let err = env
        .wallets
        .transfer(
            &OwnerId::from("alice"),
            TransferParameters {
                wallet_address: WALLET,
                transfer: transfer("2"),
                signatures: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WalletError::Operation(OperationError::Rejected(ref message)) if message.contains("AA21")
    ));

    Ok(())
}
