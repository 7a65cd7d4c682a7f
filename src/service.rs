//! The wallet service.
//!
//! Implements the caller-facing actions on top of the chain registry, the storage and the
//! platform signer.

use crate::{
    chains::{ChainKind, ChainProfile, ChainRegistry},
    constants::ESCROW_RAND_LENGTH,
    deriver::AddressDeriver,
    error::{EscrowError, OperationError, QuorumError, WalletError},
    escrow::SettlementEngine,
    estimation::{AccountState, GasEstimator, OperationBuilder},
    metrics::{self, OperationKind},
    nonce::OperationNonces,
    provider::BundlerExt,
    signers::{QuorumMutation, SignatureCoordinator},
    storage::{StorageApi, WalletStorage},
    types::{
        AccountCall, AccountSalt, Call, DynamicWalletRecord, OwnerId, SaltContext, Settlement,
        WalletRecord, parse_amount,
        rpc::{
            AddCosignerParameters, CreateDynamicWalletParameters, CreateWalletParameters,
            CreatedWallet, DeleteCosignerParameters, OperationStatus, SettleDynamicWalletParameters,
            SubmittedOperation, TransferBatchParameters, TransferParameters, WalletSummary,
        },
    },
};
use alloy::primitives::{Address, B256, Bytes};
use chrono::{Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Escrow settings of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowSettings {
    /// Share of a settled balance retained by the platform, in percent.
    pub fee_percent: u8,
    /// Recipient of the platform share.
    pub fee_recipient: Address,
}

/// Custodial quorum wallets.
#[derive(Debug, Clone)]
pub struct Wallets {
    inner: Arc<WalletsInner>,
}

#[derive(Debug)]
struct WalletsInner {
    chains: ChainRegistry,
    storage: WalletStorage,
    coordinator: SignatureCoordinator,
    nonces: OperationNonces,
    escrow: EscrowSettings,
}

impl Wallets {
    /// Create a new instance of [`Wallets`].
    pub fn new(
        chains: ChainRegistry,
        storage: WalletStorage,
        coordinator: SignatureCoordinator,
        escrow: EscrowSettings,
    ) -> Self {
        Self {
            inner: Arc::new(WalletsInner {
                chains,
                storage,
                coordinator,
                nonces: OperationNonces::default(),
                escrow,
            }),
        }
    }

    /// Returns the configured chains.
    pub fn chains(&self) -> &ChainRegistry {
        &self.inner.chains
    }

    /// Returns the storage.
    pub fn storage(&self) -> &WalletStorage {
        &self.inner.storage
    }

    /// Address of the platform signer.
    pub fn platform(&self) -> Address {
        self.inner.coordinator.platform()
    }

    /// Lists the wallets of `owner`.
    #[instrument(skip(self))]
    pub async fn wallets(&self, owner: &OwnerId) -> Result<Vec<WalletSummary>, WalletError> {
        let wallets = self.inner.storage.read_wallets(owner).await?;
        Ok(wallets.into_iter().map(Into::into).collect())
    }

    /// Creates the wallet of `owner` for a chain and wallet type.
    #[instrument(skip(self))]
    pub async fn create_wallet(
        &self,
        owner: &OwnerId,
        params: CreateWalletParameters,
    ) -> Result<CreatedWallet, WalletError> {
        let CreateWalletParameters { chain: kind, wallet_type } = params;
        let chain = self.inner.chains.get(kind)?;
        let token = chain.token(&wallet_type)?.clone();

        if self.inner.storage.read_wallet(owner, kind, &wallet_type).await?.is_some() {
            return Err(WalletError::WalletExists { chain: kind, wallet_type });
        }

        let salt = AccountSalt::derive(&SaltContext::User {
            id: owner.clone(),
            chain: kind,
            wallet_type: wallet_type.clone(),
        })
        .into();
        let address = AddressDeriver::for_chain(&chain).derive(self.platform(), salt).await?;

        self.inner
            .storage
            .write_wallet(WalletRecord {
                owner: owner.clone(),
                address,
                salt,
                chain: kind,
                wallet_type,
                token,
            })
            .await?;

        info!(%address, "Created wallet");
        metrics::record_wallet_created(kind, false);

        Ok(CreatedWallet { address, salt })
    }

    /// Transfers tokens out of a wallet of `owner`.
    #[instrument(skip(self, params), fields(wallet = %params.wallet_address))]
    pub async fn transfer(
        &self,
        owner: &OwnerId,
        params: TransferParameters,
    ) -> Result<SubmittedOperation, WalletError> {
        SignatureCoordinator::validate_cosigners(params.signatures.as_ref())?;

        let (wallet, chain) = self.owned_wallet(owner, params.wallet_address).await?;
        let decimals = chain.token_decimals(wallet.token.address).await?;
        let amount = parse_amount(&params.transfer.amount, decimals)?;

        let call = Call::transfer(wallet.token.address, params.transfer.to_address, amount);
        let state = self.builder(&chain).account_state(wallet.address).await?;

        self.submit(
            &chain,
            &wallet,
            state,
            AccountCall::Single(call),
            params.signatures.as_ref(),
            OperationKind::Transfer,
        )
        .await
    }

    /// Executes several transfers out of a wallet of `owner` in a single operation.
    #[instrument(skip(self, params), fields(wallet = %params.wallet_address))]
    pub async fn transfer_batch(
        &self,
        owner: &OwnerId,
        params: TransferBatchParameters,
    ) -> Result<SubmittedOperation, WalletError> {
        if params.transactions.is_empty() {
            return Err(WalletError::EmptyBatch);
        }
        SignatureCoordinator::validate_cosigners(params.signatures.as_ref())?;

        let (wallet, chain) = self.owned_wallet(owner, params.wallet_address).await?;
        let decimals = chain.token_decimals(wallet.token.address).await?;

        let calls = params
            .transactions
            .iter()
            .map(|transfer| {
                let amount = parse_amount(&transfer.amount, decimals)?;
                Ok(Call::transfer(wallet.token.address, transfer.to_address, amount))
            })
            .collect::<Result<Vec<_>, WalletError>>()?;
        let state = self.builder(&chain).account_state(wallet.address).await?;

        self.submit(
            &chain,
            &wallet,
            state,
            AccountCall::Batch(calls),
            params.signatures.as_ref(),
            OperationKind::TransferBatch,
        )
        .await
    }

    /// Adds a co-signer to the quorum of a wallet of `owner`.
    #[instrument(skip(self, params), fields(wallet = %params.wallet_address))]
    pub async fn add_cosigner(
        &self,
        owner: &OwnerId,
        params: AddCosignerParameters,
    ) -> Result<SubmittedOperation, WalletError> {
        let mutation = QuorumMutation::Add(params.cosigner_address);
        self.mutate_quorum(owner, params.wallet_address, mutation, params.signatures.as_ref())
            .await
            .map_err(|err| match err {
                WalletError::Operation(OperationError::Rejected(message))
                    if message.contains("already exists") =>
                {
                    QuorumError::DuplicateSigner(params.cosigner_address).into()
                }
                WalletError::Operation(OperationError::Rejected(_)) => {
                    QuorumError::InvalidSignatures.into()
                }
                err => err,
            })
    }

    /// Removes a co-signer from the quorum of a wallet of `owner`.
    #[instrument(skip(self, params), fields(wallet = %params.wallet_address))]
    pub async fn delete_cosigner(
        &self,
        owner: &OwnerId,
        params: DeleteCosignerParameters,
    ) -> Result<SubmittedOperation, WalletError> {
        let mutation = QuorumMutation::Delete(params.cosigner_address);
        self.mutate_quorum(owner, params.wallet_address, mutation, Some(&params.signatures))
            .await
            .map_err(|err| match err {
                WalletError::Operation(OperationError::Rejected(_)) => {
                    QuorumError::InvalidSignatures.into()
                }
                err => err,
            })
    }

    /// Creates an escrow wallet paying out to `params.user`.
    #[instrument(skip(self))]
    pub async fn create_dynamic_wallet(
        &self,
        owner: &OwnerId,
        params: CreateDynamicWalletParameters,
    ) -> Result<CreatedWallet, WalletError> {
        let CreateDynamicWalletParameters {
            chain: kind,
            wallet_type,
            reference_code,
            user,
            amount,
            expires,
        } = params;

        let expires_at = expires
            .map(|minutes| {
                i64::try_from(minutes)
                    .ok()
                    .and_then(Duration::try_minutes)
                    .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
                    .ok_or(WalletError::InvalidExpiry(minutes))
            })
            .transpose()?;

        if !self.inner.storage.owner_exists(&user).await? {
            return Err(WalletError::UnknownBeneficiary(user));
        }

        let chain = self.inner.chains.get(kind)?;
        let token = chain.token(&wallet_type)?.clone();
        let decimals = chain.token_decimals(token.address).await?;
        parse_amount(&amount, decimals)?;

        let rand: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ESCROW_RAND_LENGTH)
            .map(char::from)
            .collect();

        let salt: B256 = AccountSalt::derive(&SaltContext::Escrow {
            reference_code: reference_code.clone(),
            user: user.clone(),
            chain: kind,
            wallet_type: wallet_type.clone(),
            amount: amount.clone(),
            rand_str: rand.clone(),
        })
        .into();
        let address = AddressDeriver::for_chain(&chain).derive(self.platform(), salt).await?;

        self.inner
            .storage
            .write_dynamic_wallet(DynamicWalletRecord {
                address,
                salt,
                reference_code,
                beneficiary: user,
                created_by: owner.clone(),
                chain: kind,
                wallet_type,
                token,
                amount,
                rand,
                fee_recipient: self.inner.escrow.fee_recipient,
                expires_at,
            })
            .await?;

        info!(%address, ?expires_at, "Created escrow wallet");
        metrics::record_wallet_created(kind, true);

        Ok(CreatedWallet { address, salt })
    }

    /// Settles an escrow wallet.
    #[instrument(skip(self, params), fields(escrow = %params.wallet_address))]
    pub async fn settle_dynamic_wallet(
        &self,
        owner: &OwnerId,
        params: SettleDynamicWalletParameters,
    ) -> Result<Settlement, WalletError> {
        let escrow = self
            .inner
            .storage
            .read_dynamic_wallet(&params.wallet_address)
            .await?
            .ok_or(EscrowError::UnknownEscrow(params.wallet_address))?;

        let now = Utc::now();
        if escrow.is_expired_at(now) {
            return Err(EscrowError::Expired(escrow.address).into());
        }

        let payee = self
            .inner
            .storage
            .read_wallet(&escrow.beneficiary, escrow.chain, &escrow.wallet_type)
            .await?
            .ok_or_else(|| EscrowError::MissingBeneficiaryWallet {
                beneficiary: escrow.beneficiary.clone(),
                chain: escrow.chain,
                wallet_type: escrow.wallet_type.clone(),
            })?;

        let engine = SettlementEngine::new(
            self.inner.chains.get(escrow.chain)?,
            self.inner.storage.clone(),
            self.inner.coordinator.clone(),
            self.inner.nonces.clone(),
            self.inner.escrow.fee_percent,
        );

        engine.settle(&escrow, payee.address, now).await
    }

    /// Looks up a submitted operation.
    #[instrument(skip(self))]
    pub async fn operation(
        &self,
        chain: ChainKind,
        hash: B256,
    ) -> Result<Option<OperationStatus>, WalletError> {
        let chain = self.inner.chains.get(chain)?;
        let op = chain.bundler.get_user_operation_by_hash(hash).await?;

        Ok(op.map(|op| OperationStatus {
            user_op_hash: hash,
            transaction_hash: op.transaction_hash,
        }))
    }

    /// Returns the wallet of `owner` at `address` and its chain.
    async fn owned_wallet(
        &self,
        owner: &OwnerId,
        address: Address,
    ) -> Result<(WalletRecord, Arc<ChainProfile>), WalletError> {
        let wallet = self
            .inner
            .storage
            .read_wallet_by_address(owner, &address)
            .await?
            .ok_or(WalletError::NotOwner(address))?;
        let chain = self.inner.chains.get(wallet.chain)?;
        Ok((wallet, chain))
    }

    /// Signs and submits a quorum mutation of a wallet of `owner`.
    async fn mutate_quorum(
        &self,
        owner: &OwnerId,
        address: Address,
        mutation: QuorumMutation,
        cosigners: Option<&Bytes>,
    ) -> Result<SubmittedOperation, WalletError> {
        SignatureCoordinator::validate_cosigners(cosigners)?;

        let (wallet, chain) = self.owned_wallet(owner, address).await?;

        let state = self.builder(&chain).account_state(wallet.address).await?;
        if !state.deployed {
            return Err(QuorumError::AccountNotDeployed(wallet.address).into());
        }
        let signers_nonce = chain.account(wallet.address).signers_nonce().await?;

        let signatures = self
            .inner
            .coordinator
            .sign_quorum_mutation(mutation, &state.signers, signers_nonce, cosigners)
            .await?;

        let (call, kind) = match mutation {
            QuorumMutation::Add(signer) => {
                (AccountCall::AddSigner { signer, signatures }, OperationKind::AddCosigner)
            }
            QuorumMutation::Delete(signer) => {
                (AccountCall::DeleteSigner { signer, signatures }, OperationKind::DeleteCosigner)
            }
        };

        // The quorum approval travels in the calldata, the operation only needs the platform.
        self.submit(&chain, &wallet, state, call, None, kind).await
    }

    /// Returns the operation builder of accounts on `chain`.
    fn builder(&self, chain: &Arc<ChainProfile>) -> OperationBuilder {
        OperationBuilder::new(chain.clone(), self.platform())
    }

    /// Builds, estimates, signs and submits an operation from `wallet` in `state`.
    async fn submit(
        &self,
        chain: &Arc<ChainProfile>,
        wallet: &WalletRecord,
        state: AccountState,
        call: AccountCall,
        cosigners: Option<&Bytes>,
        kind: OperationKind,
    ) -> Result<SubmittedOperation, WalletError> {
        let mut lease =
            self.inner.nonces.acquire(chain.chain_id, &chain.entrypoint(), wallet.address).await?;
        let op = self.builder(chain).build(&state, wallet.salt, lease.next_nonce(), &call);
        let op = GasEstimator::new(chain.clone()).estimate(op).await?;
        let op = self
            .inner
            .coordinator
            .sign_operation(op, chain.entrypoint, chain.chain_id, cosigners)
            .await?;

        match chain.bundler.send_user_operation(&op, chain.entrypoint).await {
            Ok(user_op_hash) => {
                lease.commit(op.nonce);
                debug!(%user_op_hash, nonce = %op.nonce, "Submitted operation");
                metrics::record_operation(chain.kind, kind);
                Ok(SubmittedOperation { user_op_hash })
            }
            Err(err) => {
                metrics::record_rejection(chain.kind, kind);
                Err(OperationError::from(err).into())
            }
        }
    }
}
