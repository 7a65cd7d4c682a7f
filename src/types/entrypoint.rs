use crate::constants::NONCE_KEY;
use IEntryPoint::IEntryPointInstance;
use alloy::{
    primitives::{Address, Bytes, U256, aliases::U192},
    providers::Provider,
    sol,
    sol_types::SolError,
    transports::{TransportErrorKind, TransportResult},
};

sol! {
    /// The v0.6 entrypoint.
    #[sol(rpc)]
    #[derive(Debug)]
    interface IEntryPoint {
        /// Carries the counterfactual sender computed by `getSenderAddress`.
        error SenderAddressResult(address sender);

        /// Computes the sender for `initCode`. Always reverts with [`SenderAddressResult`].
        function getSenderAddress(bytes calldata initCode) external;

        /// Returns the next nonce of `sender` under `key`.
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce);
    }
}

/// Outcome of simulating `getSenderAddress`.
///
/// The entrypoint reports the address through a revert, so a revert carrying
/// [`IEntryPoint::SenderAddressResult`] is the successful outcome here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderAddressOutcome {
    /// The counterfactual address.
    Address(Address),
    /// The query failed without a usable address.
    Error(String),
}

impl SenderAddressOutcome {
    /// Interprets the revert data of a `getSenderAddress` call.
    pub fn from_revert_data(data: Option<&Bytes>) -> Self {
        let Some(data) = data else {
            return Self::Error("call reverted without data".into());
        };

        if let Ok(result) = IEntryPoint::SenderAddressResult::abi_decode(data) {
            return Self::Address(result.sender);
        }

        // Some nodes pad or wrap the payload, the address is always the trailing word.
        if data.starts_with(&IEntryPoint::SenderAddressResult::SELECTOR) && data.len() >= 24 {
            return Self::Address(Address::from_slice(&data[data.len() - 20..]));
        }

        Self::Error(format!("unexpected revert data {data}"))
    }
}

/// A v0.6 entrypoint.
#[derive(Debug, Clone)]
pub struct EntryPoint<P: Provider> {
    entrypoint: IEntryPointInstance<P>,
}

impl<P: Provider> EntryPoint<P> {
    /// Create a new instance of [`EntryPoint`].
    pub fn new(address: Address, provider: P) -> Self {
        Self { entrypoint: IEntryPointInstance::new(address, provider) }
    }

    /// Get the address of the entrypoint.
    pub fn address(&self) -> &Address {
        self.entrypoint.address()
    }

    /// Get the next operation nonce of `sender`.
    pub async fn get_nonce(&self, sender: Address) -> TransportResult<U256> {
        self.entrypoint
            .getNonce(sender, U192::from(NONCE_KEY))
            .call()
            .await
            .map_err(TransportErrorKind::custom)
    }

    /// Simulates `getSenderAddress` for `init_code`.
    ///
    /// Transport failures that did not reach the entrypoint are returned as errors, everything
    /// else is reported through [`SenderAddressOutcome`].
    pub async fn simulate_sender_address(
        &self,
        init_code: Bytes,
    ) -> TransportResult<SenderAddressOutcome> {
        let ret = self.entrypoint.getSenderAddress(init_code).call().await;

        match ret {
            Err(alloy::contract::Error::TransportError(err)) => match err.as_error_resp() {
                Some(resp) => {
                    Ok(SenderAddressOutcome::from_revert_data(resp.as_revert_data().as_ref()))
                }
                None => Err(err),
            },
            Err(err) => Ok(SenderAddressOutcome::Error(err.to_string())),
            Ok(_) => Ok(SenderAddressOutcome::Error("getSenderAddress did not revert".into())),
        }
    }
}
