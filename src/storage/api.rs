//! Wallet storage api.

use crate::{
    chains::ChainKind,
    error::StorageError,
    types::{DynamicWalletRecord, OwnerId, WalletRecord, WalletType},
};
use alloy::primitives::Address;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Type alias for `Result<T, StorageError>`
pub type Result<T> = core::result::Result<T, StorageError>;

/// Storage API.
#[async_trait]
pub trait StorageApi: Debug + Send + Sync {
    /// Reads every wallet of `owner`.
    async fn read_wallets(&self, owner: &OwnerId) -> Result<Vec<WalletRecord>>;

    /// Reads the wallet of `owner` for a chain and wallet type.
    async fn read_wallet(
        &self,
        owner: &OwnerId,
        chain: ChainKind,
        wallet_type: &WalletType,
    ) -> Result<Option<WalletRecord>>;

    /// Reads the wallet of `owner` at `address`.
    ///
    /// Wallets of other owners are never returned.
    async fn read_wallet_by_address(
        &self,
        owner: &OwnerId,
        address: &Address,
    ) -> Result<Option<WalletRecord>>;

    /// Writes a new wallet.
    ///
    /// Fails with [`StorageError::WalletAlreadyExists`] if a wallet exists at the same address.
    async fn write_wallet(&self, wallet: WalletRecord) -> Result<()>;

    /// Whether `owner` has at least one wallet.
    async fn owner_exists(&self, owner: &OwnerId) -> Result<bool>;

    /// Reads the escrow wallet at `address`.
    async fn read_dynamic_wallet(&self, address: &Address) -> Result<Option<DynamicWalletRecord>>;

    /// Writes a new escrow wallet.
    ///
    /// Fails with [`StorageError::WalletAlreadyExists`] if an escrow exists at the same address.
    async fn write_dynamic_wallet(&self, wallet: DynamicWalletRecord) -> Result<()>;

    /// Sets the expiry of the escrow wallet at `address` to `at`.
    async fn expire_dynamic_wallet(&self, address: &Address, at: DateTime<Utc>) -> Result<()>;
}
