//! Operation nonce management.
//!
//! The entrypoint only counts operations that were included on chain, so an operation still
//! pending with the bundler is invisible to the next nonce read. Each sender keeps the nonce
//! following its last accepted operation, and leases hand out the greater of that and the on-chain
//! value. A lease is held from the nonce read until the bundler answered.

use crate::types::EntryPoint;
use alloy::{
    primitives::{Address, ChainId, U256},
    providers::Provider,
    transports::TransportResult,
};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// Hands out [`NonceLease`]s, one sender at a time.
#[derive(Clone, Debug, Default)]
pub struct OperationNonces {
    /// The nonce following the last accepted operation of each sender.
    #[allow(clippy::type_complexity)]
    accepted: Arc<DashMap<(ChainId, Address), Arc<Mutex<U256>>>>,
}

impl OperationNonces {
    /// Waits for any outstanding lease on `sender` and reads its next nonce.
    pub async fn acquire<P: Provider>(
        &self,
        chain_id: ChainId,
        entrypoint: &EntryPoint<P>,
        sender: Address,
    ) -> TransportResult<NonceLease> {
        // Locks dashmap internally for a short duration to clone the `Arc`.
        // We also don't want to hold the dashmap lock through the await point below.
        let lock = {
            let rm = self.accepted.entry((chain_id, sender)).or_default();
            Arc::clone(rm.value())
        };

        let guard = lock.lock_owned().await;
        let onchain = entrypoint.get_nonce(sender).await?;
        let next = onchain.max(*guard);
        trace!(%sender, chain_id, %onchain, %next, "Acquired nonce lease");

        Ok(NonceLease { next, guard })
    }
}

/// Exclusive access to the nonce space of a sender.
///
/// Released when dropped. Nonces handed out by a lease are only remembered once
/// [committed](Self::commit), so the lease must live until the bundler accepted the operations.
#[derive(Debug)]
pub struct NonceLease {
    next: U256,
    guard: OwnedMutexGuard<U256>,
}

impl NonceLease {
    /// Returns the next nonce and advances the lease.
    pub fn next_nonce(&mut self) -> U256 {
        let nonce = self.next;
        self.next += U256::from(1);
        nonce
    }

    /// Records that the operation with `nonce` was accepted, and releases the lease.
    pub fn commit(mut self, nonce: U256) {
        let accepted = nonce.saturating_add(U256::from(1));
        if accepted > *self.guard {
            *self.guard = accepted;
        }
    }
}
