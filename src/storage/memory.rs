//! Wallet storage implementation in-memory.

use super::{StorageApi, api::Result};
use crate::{
    chains::ChainKind,
    error::StorageError,
    types::{DynamicWalletRecord, OwnerId, WalletRecord, WalletType},
};
use alloy::primitives::Address;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};

/// [`StorageApi`] implementation in-memory.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    wallets: DashMap<Address, WalletRecord>,
    dynamic_wallets: DashMap<Address, DynamicWalletRecord>,
}

#[async_trait]
impl StorageApi for InMemoryStorage {
    async fn read_wallets(&self, owner: &OwnerId) -> Result<Vec<WalletRecord>> {
        let mut wallets: Vec<_> = self
            .wallets
            .iter()
            .filter(|wallet| &wallet.owner == owner)
            .map(|wallet| wallet.value().clone())
            .collect();
        wallets.sort_by(|a, b| (a.chain, &a.wallet_type).cmp(&(b.chain, &b.wallet_type)));
        Ok(wallets)
    }

    async fn read_wallet(
        &self,
        owner: &OwnerId,
        chain: ChainKind,
        wallet_type: &WalletType,
    ) -> Result<Option<WalletRecord>> {
        Ok(self
            .wallets
            .iter()
            .find(|wallet| {
                &wallet.owner == owner
                    && wallet.chain == chain
                    && &wallet.wallet_type == wallet_type
            })
            .map(|wallet| wallet.value().clone()))
    }

    async fn read_wallet_by_address(
        &self,
        owner: &OwnerId,
        address: &Address,
    ) -> Result<Option<WalletRecord>> {
        Ok(self
            .wallets
            .get(address)
            .filter(|wallet| &wallet.owner == owner)
            .map(|wallet| wallet.value().clone()))
    }

    async fn write_wallet(&self, wallet: WalletRecord) -> Result<()> {
        match self.wallets.entry(wallet.address) {
            Entry::Occupied(_) => Err(StorageError::WalletAlreadyExists(wallet.address)),
            Entry::Vacant(entry) => {
                entry.insert(wallet);
                Ok(())
            }
        }
    }

    async fn owner_exists(&self, owner: &OwnerId) -> Result<bool> {
        Ok(self.wallets.iter().any(|wallet| &wallet.owner == owner))
    }

    async fn read_dynamic_wallet(&self, address: &Address) -> Result<Option<DynamicWalletRecord>> {
        Ok(self.dynamic_wallets.get(address).map(|wallet| wallet.value().clone()))
    }

    async fn write_dynamic_wallet(&self, wallet: DynamicWalletRecord) -> Result<()> {
        match self.dynamic_wallets.entry(wallet.address) {
            Entry::Occupied(_) => Err(StorageError::WalletAlreadyExists(wallet.address)),
            Entry::Vacant(entry) => {
                entry.insert(wallet);
                Ok(())
            }
        }
    }

    async fn expire_dynamic_wallet(&self, address: &Address, at: DateTime<Utc>) -> Result<()> {
        let mut wallet = self
            .dynamic_wallets
            .get_mut(address)
            .ok_or(StorageError::UnknownDynamicWallet(*address))?;
        wallet.expires_at = Some(at);
        Ok(())
    }
}
