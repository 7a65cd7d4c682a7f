//! Counterfactual account address derivation.

use crate::{
    chains::ChainProfile,
    error::{DerivationError, WalletError},
    types::{EntryPoint, SenderAddressOutcome, init_code},
};
use alloy::{
    primitives::{Address, B256, Bytes},
    providers::{DynProvider, Provider},
    transports::TransportResult,
};
use tracing::{debug, instrument};

/// Derives account addresses through the entrypoint's `getSenderAddress`.
///
/// Derivation never changes chain state. For a fixed factory it is a pure function of the owner
/// and the salt.
#[derive(Debug, Clone)]
pub struct AddressDeriver<P: Provider> {
    entrypoint: EntryPoint<P>,
    factory: Address,
}

impl AddressDeriver<DynProvider> {
    /// Creates the deriver of a chain.
    pub fn for_chain(profile: &ChainProfile) -> Self {
        Self::new(profile.entrypoint(), profile.factory)
    }
}

impl<P: Provider> AddressDeriver<P> {
    /// Create a new instance of [`AddressDeriver`].
    pub fn new(entrypoint: EntryPoint<P>, factory: Address) -> Self {
        Self { entrypoint, factory }
    }

    /// Returns the init code deploying the account of `owner` and `salt`.
    pub fn init_code(&self, owner: Address, salt: B256) -> Bytes {
        init_code(self.factory, owner, salt, *self.entrypoint.address())
    }

    /// Runs `getSenderAddress` for the account of `owner` and `salt`.
    pub async fn simulate(
        &self,
        owner: Address,
        salt: B256,
    ) -> TransportResult<SenderAddressOutcome> {
        self.entrypoint.simulate_sender_address(self.init_code(owner, salt)).await
    }

    /// Derives the address of the account of `owner` and `salt`.
    #[instrument(skip(self), fields(factory = %self.factory))]
    pub async fn derive(&self, owner: Address, salt: B256) -> Result<Address, WalletError> {
        match self.simulate(owner, salt).await? {
            SenderAddressOutcome::Address(address) => {
                debug!(%address, "Derived account address");
                Ok(address)
            }
            SenderAddressOutcome::Error(reason) => Err(DerivationError::NoAddress(reason).into()),
        }
    }
}
