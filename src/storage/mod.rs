//! Wallet storage

mod api;
pub use api::StorageApi;
mod memory;

use crate::{
    chains::ChainKind,
    types::{DynamicWalletRecord, OwnerId, WalletRecord, WalletType},
};
use alloy::primitives::Address;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Wallet storage interface.
#[derive(Debug, Clone)]
pub struct WalletStorage {
    inner: Arc<dyn StorageApi>,
}

impl WalletStorage {
    /// Create [`WalletStorage`] with a in-memory backend.
    pub fn in_memory() -> Self {
        Self { inner: Arc::new(memory::InMemoryStorage::default()) }
    }
}

#[async_trait]
impl StorageApi for WalletStorage {
    async fn read_wallets(&self, owner: &OwnerId) -> api::Result<Vec<WalletRecord>> {
        self.inner.read_wallets(owner).await
    }

    async fn read_wallet(
        &self,
        owner: &OwnerId,
        chain: ChainKind,
        wallet_type: &WalletType,
    ) -> api::Result<Option<WalletRecord>> {
        self.inner.read_wallet(owner, chain, wallet_type).await
    }

    async fn read_wallet_by_address(
        &self,
        owner: &OwnerId,
        address: &Address,
    ) -> api::Result<Option<WalletRecord>> {
        self.inner.read_wallet_by_address(owner, address).await
    }

    async fn write_wallet(&self, wallet: WalletRecord) -> api::Result<()> {
        self.inner.write_wallet(wallet).await
    }

    async fn owner_exists(&self, owner: &OwnerId) -> api::Result<bool> {
        self.inner.owner_exists(owner).await
    }

    async fn read_dynamic_wallet(
        &self,
        address: &Address,
    ) -> api::Result<Option<DynamicWalletRecord>> {
        self.inner.read_dynamic_wallet(address).await
    }

    async fn write_dynamic_wallet(&self, wallet: DynamicWalletRecord) -> api::Result<()> {
        self.inner.write_dynamic_wallet(wallet).await
    }

    async fn expire_dynamic_wallet(
        &self,
        address: &Address,
        at: DateTime<Utc>,
    ) -> api::Result<()> {
        self.inner.expire_dynamic_wallet(address, at).await
    }
}
