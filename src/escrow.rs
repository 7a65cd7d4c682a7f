//! Escrow wallet settlement.
//!
//! A settlement pays the deposit of an escrow wallet out as two operations from the escrow
//! account: the beneficiary share at nonce `n` and the platform share at nonce `n + 1`. Both are
//! built, estimated and signed under a single nonce lease, then submitted concurrently while the
//! lease is held.

use crate::{
    chains::ChainProfile,
    error::{EscrowError, OperationError, WalletError},
    estimation::{AccountState, GasEstimator, OperationBuilder},
    metrics::{self, OperationKind},
    nonce::{NonceLease, OperationNonces},
    provider::BundlerExt,
    signers::SignatureCoordinator,
    storage::{StorageApi, WalletStorage},
    types::{
        AccountCall, Call, DynamicWalletRecord, EscrowStatus, FeeSplit, Settlement,
        SettlementStatus, UserOperation, parse_amount,
    },
};
use alloy::{
    primitives::{Address, B256, U256},
    transports::TransportError,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Settles escrow wallets of a single chain.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    chain: Arc<ChainProfile>,
    storage: WalletStorage,
    coordinator: SignatureCoordinator,
    nonces: OperationNonces,
    fee_percent: u8,
}

impl SettlementEngine {
    /// Create a new instance of [`SettlementEngine`].
    pub fn new(
        chain: Arc<ChainProfile>,
        storage: WalletStorage,
        coordinator: SignatureCoordinator,
        nonces: OperationNonces,
        fee_percent: u8,
    ) -> Self {
        Self { chain, storage, coordinator, nonces, fee_percent }
    }

    /// Settles `escrow`, paying the beneficiary share to `payee`.
    ///
    /// - An empty escrow is left untouched.
    /// - An underpaid escrow is expired at `now` and nothing is paid out.
    /// - A funded escrow is paid out and expired at `now` once both payouts are accepted.
    #[instrument(skip_all, fields(chain = %self.chain.kind, escrow = %escrow.address))]
    pub async fn settle(
        &self,
        escrow: &DynamicWalletRecord,
        payee: Address,
        now: DateTime<Utc>,
    ) -> Result<Settlement, WalletError> {
        let token = escrow.token.address;
        let balance = self.chain.token_balance(token, escrow.address).await?;
        let decimals = self.chain.token_decimals(token).await?;
        let expected = parse_amount(&escrow.amount, decimals)?;

        let settlement = match EscrowStatus::evaluate(balance, expected, escrow.expires_at, now) {
            EscrowStatus::Expired => return Err(EscrowError::Expired(escrow.address).into()),
            EscrowStatus::Pending => Settlement::without_operations(SettlementStatus::NoFunds),
            EscrowStatus::Underpaid => {
                warn!(%balance, %expected, "Escrow is underpaid, expiring");
                self.storage.expire_dynamic_wallet(&escrow.address, now).await?;
                Settlement::without_operations(SettlementStatus::Underpaid)
            }
            EscrowStatus::Ready => {
                let operation_hashes = self.pay_out(escrow, payee, balance).await?;
                self.storage.expire_dynamic_wallet(&escrow.address, now).await?;
                info!(?operation_hashes, "Settled escrow");
                Settlement { status: SettlementStatus::Settled, operation_hashes }
            }
        };

        metrics::record_settlement(self.chain.kind, settlement.status);

        Ok(settlement)
    }

    /// Submits both payouts of `balance`, returning their hashes.
    async fn pay_out(
        &self,
        escrow: &DynamicWalletRecord,
        payee: Address,
        balance: U256,
    ) -> Result<Vec<B256>, WalletError> {
        let split = FeeSplit::new(balance, self.fee_percent);
        debug!(
            beneficiary = %split.beneficiary,
            platform = %split.platform,
            "Split escrow balance"
        );

        let (payout, fee, lease) = self.signed_pair(escrow, payee, split).await?;

        let entrypoint = self.chain.entrypoint;
        let (payout_hash, fee_hash) = tokio::join!(
            self.chain.bundler.send_user_operation(&payout, entrypoint),
            self.chain.bundler.send_user_operation(&fee, entrypoint)
        );

        match (payout_hash, fee_hash) {
            (Ok(payout_hash), Ok(fee_hash)) => {
                lease.commit(fee.nonce);
                metrics::record_operation(self.chain.kind, OperationKind::EscrowPayout);
                metrics::record_operation(self.chain.kind, OperationKind::EscrowFee);
                Ok(vec![payout_hash, fee_hash])
            }
            (Ok(accepted), Err(err)) => {
                lease.commit(payout.nonce);
                self.partially_settled(escrow, accepted, err)
            }
            (Err(err), Ok(accepted)) => {
                lease.commit(fee.nonce);
                self.partially_settled(escrow, accepted, err)
            }
            (Err(err), Err(_)) => {
                metrics::record_rejection(self.chain.kind, OperationKind::EscrowPayout);
                metrics::record_rejection(self.chain.kind, OperationKind::EscrowFee);
                Err(OperationError::from(err).into())
            }
        }
    }

    fn partially_settled(
        &self,
        escrow: &DynamicWalletRecord,
        accepted: B256,
        err: TransportError,
    ) -> Result<Vec<B256>, WalletError> {
        let rejected = OperationError::from(err);
        warn!(%accepted, %rejected, "Escrow settled partially");
        metrics::record_partial_settlement(self.chain.kind);
        Err(EscrowError::PartialSettlement { escrow: escrow.address, accepted, rejected }.into())
    }

    /// Builds, estimates and signs the payout and fee operations under one nonce lease.
    async fn signed_pair(
        &self,
        escrow: &DynamicWalletRecord,
        payee: Address,
        split: FeeSplit,
    ) -> Result<(UserOperation, UserOperation, NonceLease), WalletError> {
        let builder = OperationBuilder::new(self.chain.clone(), self.coordinator.platform());
        let state = builder.account_state(escrow.address).await?;

        let token = escrow.token.address;
        let payout_call = AccountCall::Single(Call::transfer(token, payee, split.beneficiary));
        let fee_call =
            AccountCall::Single(Call::transfer(token, escrow.fee_recipient, split.platform));

        let mut lease = self
            .nonces
            .acquire(self.chain.chain_id, &self.chain.entrypoint(), escrow.address)
            .await?;

        let payout = builder.build(&state, escrow.salt, lease.next_nonce(), &payout_call);
        // The payout deploys the account, the fee operation runs against the deployed account.
        let deployed = AccountState { deployed: true, ..state };
        let fee = builder.build(&deployed, escrow.salt, lease.next_nonce(), &fee_call);

        let payout = GasEstimator::new(self.chain.clone()).estimate(payout).await?;
        let fee = fee.with_gas_from(&payout);

        let entrypoint = self.chain.entrypoint;
        let chain_id = self.chain.chain_id;
        let payout = self.coordinator.sign_operation(payout, entrypoint, chain_id, None).await?;
        let fee = self.coordinator.sign_operation(fee, entrypoint, chain_id, None).await?;

        Ok((payout, fee, lease))
    }
}
