//! # Wallet RPC
//!
//! Implementations of a custom `wallet_` namespace.
//!
//! Every method but `wallet_getOperation` and `wallet_health` acts on behalf of an owner. The
//! owner identity is resolved by the session layer in front of this service and passed as the
//! first parameter.

use alloy::primitives::B256;
use jsonrpsee::{
    core::{RpcResult, async_trait},
    proc_macros::rpc,
};

use crate::{
    chains::ChainKind,
    error::ToRpcResult,
    service::Wallets,
    types::{
        OwnerId, Settlement,
        rpc::{
            AddCosignerParameters, CreateDynamicWalletParameters, CreateWalletParameters,
            CreatedWallet, DeleteCosignerParameters, OperationStatus, SettleDynamicWalletParameters,
            SubmittedOperation, TransferBatchParameters, TransferParameters, WalletSummary,
        },
    },
};

/// Custodial wallet `wallet_` RPC namespace.
#[rpc(server, client, namespace = "wallet")]
pub trait WalletApi {
    /// Lists the wallets of an owner.
    #[method(name = "getWallets")]
    async fn get_wallets(&self, owner: OwnerId) -> RpcResult<Vec<WalletSummary>>;

    /// Creates the wallet of an owner for a chain and wallet type.
    ///
    /// The account is counterfactual, it is deployed by its first operation.
    #[method(name = "createWallet")]
    async fn create_wallet(
        &self,
        owner: OwnerId,
        parameters: CreateWalletParameters,
    ) -> RpcResult<CreatedWallet>;

    /// Transfers tokens out of a wallet.
    #[method(name = "transfer")]
    async fn transfer(
        &self,
        owner: OwnerId,
        parameters: TransferParameters,
    ) -> RpcResult<SubmittedOperation>;

    /// Transfers tokens out of a wallet to several recipients in one operation.
    #[method(name = "transferBatch")]
    async fn transfer_batch(
        &self,
        owner: OwnerId,
        parameters: TransferBatchParameters,
    ) -> RpcResult<SubmittedOperation>;

    /// Adds a co-signer to the quorum of a wallet.
    #[method(name = "addCosigner")]
    async fn add_cosigner(
        &self,
        owner: OwnerId,
        parameters: AddCosignerParameters,
    ) -> RpcResult<SubmittedOperation>;

    /// Removes a co-signer from the quorum of a wallet.
    #[method(name = "deleteCosigner")]
    async fn delete_cosigner(
        &self,
        owner: OwnerId,
        parameters: DeleteCosignerParameters,
    ) -> RpcResult<SubmittedOperation>;

    /// Creates an escrow wallet.
    #[method(name = "createDynamicWallet")]
    async fn create_dynamic_wallet(
        &self,
        owner: OwnerId,
        parameters: CreateDynamicWalletParameters,
    ) -> RpcResult<CreatedWallet>;

    /// Settles an escrow wallet.
    #[method(name = "settleDynamicWallet")]
    async fn settle_dynamic_wallet(
        &self,
        owner: OwnerId,
        parameters: SettleDynamicWalletParameters,
    ) -> RpcResult<Settlement>;

    /// Looks up a submitted operation. Returns `null` for operations the bundler does not know.
    #[method(name = "getOperation")]
    async fn get_operation(
        &self,
        chain: ChainKind,
        hash: B256,
    ) -> RpcResult<Option<OperationStatus>>;

    /// Returns the service version.
    #[method(name = "health")]
    async fn health(&self) -> RpcResult<String>;
}

/// Implementation of the `wallet_` namespace.
#[derive(Debug, Clone)]
pub struct WalletRpc {
    wallets: Wallets,
}

impl WalletRpc {
    /// Create a new wallet RPC module.
    pub fn new(wallets: Wallets) -> Self {
        Self { wallets }
    }
}

#[async_trait]
impl WalletApiServer for WalletRpc {
    async fn get_wallets(&self, owner: OwnerId) -> RpcResult<Vec<WalletSummary>> {
        self.wallets.wallets(&owner).await.to_rpc_result()
    }

    async fn create_wallet(
        &self,
        owner: OwnerId,
        parameters: CreateWalletParameters,
    ) -> RpcResult<CreatedWallet> {
        self.wallets.create_wallet(&owner, parameters).await.to_rpc_result()
    }

    async fn transfer(
        &self,
        owner: OwnerId,
        parameters: TransferParameters,
    ) -> RpcResult<SubmittedOperation> {
        self.wallets.transfer(&owner, parameters).await.to_rpc_result()
    }

    async fn transfer_batch(
        &self,
        owner: OwnerId,
        parameters: TransferBatchParameters,
    ) -> RpcResult<SubmittedOperation> {
        self.wallets.transfer_batch(&owner, parameters).await.to_rpc_result()
    }

    async fn add_cosigner(
        &self,
        owner: OwnerId,
        parameters: AddCosignerParameters,
    ) -> RpcResult<SubmittedOperation> {
        self.wallets.add_cosigner(&owner, parameters).await.to_rpc_result()
    }

    async fn delete_cosigner(
        &self,
        owner: OwnerId,
        parameters: DeleteCosignerParameters,
    ) -> RpcResult<SubmittedOperation> {
        self.wallets.delete_cosigner(&owner, parameters).await.to_rpc_result()
    }

    async fn create_dynamic_wallet(
        &self,
        owner: OwnerId,
        parameters: CreateDynamicWalletParameters,
    ) -> RpcResult<CreatedWallet> {
        self.wallets.create_dynamic_wallet(&owner, parameters).await.to_rpc_result()
    }

    async fn settle_dynamic_wallet(
        &self,
        owner: OwnerId,
        parameters: SettleDynamicWalletParameters,
    ) -> RpcResult<Settlement> {
        self.wallets.settle_dynamic_wallet(&owner, parameters).await.to_rpc_result()
    }

    async fn get_operation(
        &self,
        chain: ChainKind,
        hash: B256,
    ) -> RpcResult<Option<OperationStatus>> {
        self.wallets.operation(chain, hash).await.to_rpc_result()
    }

    async fn health(&self) -> RpcResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }
}
