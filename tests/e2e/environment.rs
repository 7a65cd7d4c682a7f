//! Wallet service test environment.
//!
//! The chain and the bundler share a mocked transport replaying queued responses in request
//! order, so every test pushes the responses of the calls an action makes, in order.

use alloy::{
    primitives::{Address, B256, Bytes, U256, address},
    providers::{Provider, ProviderBuilder},
    rpc::json_rpc::ErrorPayload,
    sol_types::{SolError, SolValue},
    transports::mock::Asserter,
};
use quorum_wallets::{
    chains::{ChainKind, ChainProfile, ChainRegistry},
    config::{ChainConfig, ENTRYPOINT_V06},
    service::{EscrowSettings, Wallets},
    signers::{DynSigner, SignatureCoordinator},
    storage::WalletStorage,
    types::{
        IEntryPoint, OwnerId, Token, WalletType,
        rpc::{CreateWalletParameters, CreatedWallet},
    },
};

/// Chain of the environment.
pub const CHAIN: ChainKind = ChainKind::BaseSepolia;

/// Account factory.
pub const FACTORY: Address = address!("0x9406Cc6185a346906296840746125a0E44976454");

/// Token of `usdt` wallets.
pub const USDT: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");

/// Token of `usdc` wallets.
pub const USDC: Address = address!("0x036CbD53842c5426634e7929541eC2318f3dCF7e");

/// Recipient of escrow fees.
pub const FEE_RECIPIENT: Address = address!("0x0000000000000000000000000000000000000fee");

/// Platform signer key.
pub const PLATFORM_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Wallet service backed by a mocked chain.
pub struct Environment {
    pub wallets: Wallets,
    pub asserter: Asserter,
    pub platform: Address,
}

impl Environment {
    pub async fn setup() -> eyre::Result<Self> {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone()).erased();

        let config = ChainConfig {
            endpoint: "http://localhost:8545".parse()?,
            bundler: None,
            entrypoint: ENTRYPOINT_V06,
            factory: FACTORY,
            paymaster: None,
            tokens: [
                (WalletType::new("usdt"), Token { name: "USDT".into(), address: USDT }),
                (WalletType::new("usdc"), Token { name: "USDC".into(), address: USDC }),
            ]
            .into(),
        };
        let chains = ChainRegistry::new([ChainProfile::new(CHAIN, &config, provider, None)]);

        let signer = DynSigner::from_signing_key(PLATFORM_KEY).await?;
        let platform = signer.address();

        let wallets = Wallets::new(
            chains,
            WalletStorage::in_memory(),
            SignatureCoordinator::new(signer),
            EscrowSettings { fee_percent: 5, fee_recipient: FEE_RECIPIENT },
        );

        Ok(Self { wallets, asserter, platform })
    }

    /// Creates a wallet of `owner` at `address`.
    pub async fn create_wallet(
        &self,
        owner: &str,
        wallet_type: &str,
        address: Address,
    ) -> eyre::Result<CreatedWallet> {
        self.push_sender_address(address);
        let created = self
            .wallets
            .create_wallet(
                &OwnerId::from(owner),
                CreateWalletParameters { chain: CHAIN, wallet_type: wallet_type.into() },
            )
            .await?;
        Ok(created)
    }

    /// Pushes an `eth_call` result.
    pub fn push_abi<T: SolValue>(&self, value: T) {
        self.asserter.push_success(&Bytes::from(value.abi_encode()));
    }

    /// Pushes the token `decimals()`.
    pub fn push_decimals(&self) {
        self.push_abi(U256::from(6));
    }

    /// Pushes the revert of `getSenderAddress`.
    pub fn push_sender_address(&self, sender: Address) {
        let data = Bytes::from(IEntryPoint::SenderAddressResult { sender }.abi_encode());
        self.asserter.push_failure(ErrorPayload {
            code: 3,
            message: "execution reverted".into(),
            data: Some(serde_json::value::to_raw_value(&data).unwrap()),
        });
    }

    /// Pushes `eth_getCode` of an account.
    pub fn push_code(&self, deployed: bool) {
        let code = if deployed { Bytes::from_static(&[0x60, 0x80]) } else { Bytes::new() };
        self.asserter.push_success(&code);
    }

    /// Pushes the account state read of an operation: code, then the quorum if deployed.
    pub fn push_account(&self, signers: Option<Vec<Address>>) {
        self.push_code(signers.is_some());
        if let Some(signers) = signers {
            self.push_abi(signers);
        }
    }

    /// Pushes the responses of a gas and fee estimation.
    pub fn push_estimation(&self) {
        self.asserter.push_success(&serde_json::json!({
            "preVerificationGas": "0xafc8",
            "verificationGasLimit": "0x249f0",
            "callGasLimit": "0xc350",
        }));
        self.asserter.push_success(&serde_json::json!({
            "oldestBlock": "0x1",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]],
        }));
        self.asserter.push_success(&U256::from(1_500_000_000u64));
    }

    /// Pushes the nonce, estimation and submission of an operation accepted as `hash`.
    pub fn push_submission(&self, nonce: u64, hash: B256) {
        self.push_abi(U256::from(nonce));
        self.push_estimation();
        self.asserter.push_success(&hash);
    }

    /// Pushes a bundler rejection.
    pub fn push_rejection(&self, message: &'static str) {
        self.asserter.push_failure(ErrorPayload {
            code: -32500,
            message: message.into(),
            data: None,
        });
    }
}
