//! Escrow wallets.

use crate::e2e::{CHAIN, Environment, FEE_RECIPIENT, USDT};
use alloy::primitives::{Address, B256, U256, address};
use chrono::Utc;
use quorum_wallets::{
    error::{EscrowError, WalletError},
    storage::StorageApi,
    types::{
        OwnerId, Settlement, SettlementStatus,
        rpc::{CreateDynamicWalletParameters, CreatedWallet, SettleDynamicWalletParameters},
    },
};

const ALICE_WALLET: Address = address!("0x1111111111111111111111111111111111111111");
const ESCROW: Address = address!("0xe5c0000000000000000000000000000000000001");

fn parameters(
    user: &str,
    wallet_type: &str,
    expires: Option<u64>,
) -> CreateDynamicWalletParameters {
    CreateDynamicWalletParameters {
        chain: CHAIN,
        wallet_type: wallet_type.into(),
        reference_code: "INV-42".into(),
        user: user.into(),
        amount: "10".into(),
        expires,
    }
}

/// An environment where `alice` has a `usdt` wallet and `merchant` opened a `usdt` escrow for her.
async fn escrow_for_alice() -> eyre::Result<(Environment, CreatedWallet)> {
    let env = Environment::setup().await?;
    env.create_wallet("alice", "usdt", ALICE_WALLET).await?;

    env.push_decimals();
    env.push_sender_address(ESCROW);
    let escrow = env
        .wallets
        .create_dynamic_wallet(&OwnerId::from("merchant"), parameters("alice", "usdt", Some(30)))
        .await?;

    Ok((env, escrow))
}

async fn settle(env: &Environment) -> Result<Settlement, WalletError> {
    env.wallets
        .settle_dynamic_wallet(
            &OwnerId::from("merchant"),
            SettleDynamicWalletParameters { wallet_address: ESCROW },
        )
        .await
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_beneficiary() -> eyre::Result<()> {
    let env = Environment::setup().await?;

    let err = env
        .wallets
        .create_dynamic_wallet(&OwnerId::from("merchant"), parameters("nobody", "usdt", None))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::UnknownBeneficiary(ref user) if user.as_str() == "nobody"));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn expiry_out_of_range() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    env.create_wallet("alice", "usdt", ALICE_WALLET).await?;

    for minutes in [1_000_000_000_000, u64::MAX] {
        let err = env
            .wallets
            .create_dynamic_wallet(
                &OwnerId::from("merchant"),
                parameters("alice", "usdt", Some(minutes)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidExpiry(m) if m == minutes));
    }
    assert!(env.wallets.storage().read_dynamic_wallet(&ESCROW).await?.is_none());

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn create_escrow() -> eyre::Result<()> {
    let before = Utc::now();
    let (env, created) = escrow_for_alice().await?;
    assert_eq!(created.address, ESCROW);

    let record = env.wallets.storage().read_dynamic_wallet(&ESCROW).await?.unwrap();
    assert_eq!(record.salt, created.salt);
    assert_eq!(record.beneficiary.as_str(), "alice");
    assert_eq!(record.created_by.as_str(), "merchant");
    assert_eq!(record.token.address, USDT);
    assert_eq!(record.fee_recipient, FEE_RECIPIENT);
    assert_eq!(record.rand.len(), 20);
    assert!(record.expires_at.is_some_and(|expires_at| expires_at > before));

    // escrows are not listed among the wallets of the beneficiary
    assert_eq!(env.wallets.wallets(&OwnerId::from("alice")).await?.len(), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn escrow_salts_are_unique() -> eyre::Result<()> {
    let (env, first) = escrow_for_alice().await?;

    env.push_decimals();
    env.push_sender_address(Address::repeat_byte(0xe6));
    let second = env
        .wallets
        .create_dynamic_wallet(&OwnerId::from("merchant"), parameters("alice", "usdt", None))
        .await?;
    assert_ne!(first.salt, second.salt);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_beneficiary_wallet() -> eyre::Result<()> {
    let env = Environment::setup().await?;
    env.create_wallet("alice", "usdt", ALICE_WALLET).await?;

    env.push_decimals();
    env.push_sender_address(ESCROW);
    env.wallets
        .create_dynamic_wallet(&OwnerId::from("merchant"), parameters("alice", "usdc", None))
        .await?;

    let err = settle(&env).await.unwrap_err();
    assert!(matches!(err, WalletError::Escrow(EscrowError::MissingBeneficiaryWallet { .. })));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn settles_once() -> eyre::Result<()> {
    let (env, _) = escrow_for_alice().await?;
    let payout = B256::repeat_byte(0x01);
    let fee = B256::repeat_byte(0x02);

    env.push_abi(U256::from(10_000_000));
    env.push_decimals();
    env.push_account(None);
    env.push_abi(U256::ZERO);
    env.push_estimation();
    env.asserter.push_success(&payout);
    env.asserter.push_success(&fee);

    let settlement = settle(&env).await?;
    assert_eq!(settlement.status, SettlementStatus::Settled);
    assert_eq!(settlement.operation_hashes.len(), 2);
    assert!(settlement.operation_hashes.contains(&payout));
    assert!(settlement.operation_hashes.contains(&fee));

    let err = settle(&env).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::Escrow(EscrowError::Expired(address)) if address == ESCROW
    ));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn underpaid_escrow_expires() -> eyre::Result<()> {
    let (env, _) = escrow_for_alice().await?;

    env.push_abi(U256::from(5_000_000));
    env.push_decimals();

    let settlement = settle(&env).await?;
    assert_eq!(settlement.status, SettlementStatus::Underpaid);
    assert!(settlement.operation_hashes.is_empty());

    let err = settle(&env).await.unwrap_err();
    assert!(matches!(err, WalletError::Escrow(EscrowError::Expired(_))));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_escrow_stays_open() -> eyre::Result<()> {
    let (env, _) = escrow_for_alice().await?;
    let record = env.wallets.storage().read_dynamic_wallet(&ESCROW).await?.unwrap();

    env.push_abi(U256::ZERO);
    env.push_decimals();

    let settlement = settle(&env).await?;
    assert_eq!(settlement.status, SettlementStatus::NoFunds);

    let unchanged = env.wallets.storage().read_dynamic_wallet(&ESCROW).await?.unwrap();
    assert_eq!(unchanged.expires_at, record.expires_at);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_escrow() -> eyre::Result<()> {
    let env = Environment::setup().await?;

    let err = settle(&env).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::Escrow(EscrowError::UnknownEscrow(address)) if address == ESCROW
    ));

    Ok(())
}
