//! Helpers to run components against a mocked chain.
//!
//! Mocked responses are replayed in request order.

use crate::{
    chains::{ChainKind, ChainProfile},
    config::{ChainConfig, ENTRYPOINT_V06},
    signers::DynSigner,
    types::{IEntryPoint, Token, WalletType},
};
use alloy::{
    primitives::{Address, Bytes, U256, address},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::json_rpc::ErrorPayload,
    sol_types::{SolError, SolValue},
    transports::mock::Asserter,
};

/// Factory of the mocked chain.
pub(crate) const FACTORY: Address = address!("0x9406Cc6185a346906296840746125a0E44976454");

/// Token of `usdt` wallets on the mocked chain.
pub(crate) const TOKEN: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");

/// Private key of the platform signer.
pub(crate) const PLATFORM_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// A provider replaying the responses pushed to the returned [`Asserter`].
pub(crate) fn mock_provider() -> (DynProvider, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone()).erased();
    (provider, asserter)
}

/// A profile of the mocked chain.
pub(crate) fn mock_profile(provider: DynProvider) -> ChainProfile {
    let config = ChainConfig {
        endpoint: "http://localhost:8545".parse().unwrap(),
        bundler: None,
        entrypoint: ENTRYPOINT_V06,
        factory: FACTORY,
        paymaster: None,
        tokens: [(WalletType::new("usdt"), Token { name: "USDT".into(), address: TOKEN })].into(),
    };
    ChainProfile::new(ChainKind::BaseSepolia, &config, provider, None)
}

/// The platform signer.
pub(crate) async fn platform_signer() -> DynSigner {
    DynSigner::from_signing_key(PLATFORM_KEY).await.unwrap()
}

/// Pushes an `eth_call` result.
pub(crate) fn push_abi<T: SolValue>(asserter: &Asserter, value: T) {
    asserter.push_success(&Bytes::from(value.abi_encode()));
}

/// Pushes an `eth_call` revert carrying `data`.
pub(crate) fn push_revert(asserter: &Asserter, data: Bytes) {
    asserter.push_failure(ErrorPayload {
        code: 3,
        message: "execution reverted".into(),
        data: Some(serde_json::value::to_raw_value(&data).unwrap()),
    });
}

/// Pushes the revert of `getSenderAddress`.
pub(crate) fn push_sender_address(asserter: &Asserter, sender: Address) {
    push_revert(asserter, IEntryPoint::SenderAddressResult { sender }.abi_encode().into());
}

/// Pushes `eth_getCode` of a deployed or undeployed account.
pub(crate) fn push_code(asserter: &Asserter, deployed: bool) {
    let code = if deployed { Bytes::from_static(&[0x60, 0x80]) } else { Bytes::new() };
    asserter.push_success(&code);
}

/// Pushes the responses of a gas and fee estimation.
pub(crate) fn push_estimation(asserter: &Asserter) {
    asserter.push_success(&serde_json::json!({
        "preVerificationGas": "0xafc8",
        "verificationGasLimit": "0x249f0",
        "callGasLimit": "0xc350",
    }));
    asserter.push_success(&serde_json::json!({
        "oldestBlock": "0x1",
        "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
        "gasUsedRatio": [0.5],
        "reward": [["0x3b9aca00"]],
    }));
    asserter.push_success(&U256::from(1_500_000_000u64));
}

/// Pushes a bundler rejection.
pub(crate) fn push_rejection(asserter: &Asserter, message: &'static str) {
    asserter.push_failure(ErrorPayload { code: -32500, message: message.into(), data: None });
}
