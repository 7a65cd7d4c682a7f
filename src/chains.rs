//! Registry of supported chains.

use crate::{
    config::ChainConfig,
    error::WalletError,
    types::{EntryPoint, IERC20, QuorumAccount, Token, WalletType},
};
use alloy::{
    primitives::{Address, Bytes, ChainId, U256, map::HashMap},
    providers::DynProvider,
    transports::{TransportErrorKind, TransportResult},
};
use alloy_chains::NamedChain;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

/// A chain wallets can be created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainKind {
    /// Ethereum mainnet.
    Ethereum,
    /// Sepolia.
    Sepolia,
    /// Base.
    Base,
    /// Base Sepolia.
    BaseSepolia,
    /// Optimism.
    Optimism,
    /// Optimism Sepolia.
    OptimismSepolia,
    /// Arbitrum One.
    Arbitrum,
    /// Arbitrum Sepolia.
    ArbitrumSepolia,
    /// Polygon PoS.
    Polygon,
    /// Polygon Amoy.
    PolygonAmoy,
}

impl ChainKind {
    /// All known chains.
    pub const ALL: [Self; 10] = [
        Self::Ethereum,
        Self::Sepolia,
        Self::Base,
        Self::BaseSepolia,
        Self::Optimism,
        Self::OptimismSepolia,
        Self::Arbitrum,
        Self::ArbitrumSepolia,
        Self::Polygon,
        Self::PolygonAmoy,
    ];

    /// Returns the matching [`NamedChain`].
    pub const fn named(&self) -> NamedChain {
        match self {
            Self::Ethereum => NamedChain::Mainnet,
            Self::Sepolia => NamedChain::Sepolia,
            Self::Base => NamedChain::Base,
            Self::BaseSepolia => NamedChain::BaseSepolia,
            Self::Optimism => NamedChain::Optimism,
            Self::OptimismSepolia => NamedChain::OptimismSepolia,
            Self::Arbitrum => NamedChain::Arbitrum,
            Self::ArbitrumSepolia => NamedChain::ArbitrumSepolia,
            Self::Polygon => NamedChain::Polygon,
            Self::PolygonAmoy => NamedChain::PolygonAmoy,
        }
    }

    /// Returns the chain ID.
    pub fn id(&self) -> ChainId {
        self.named() as ChainId
    }

    /// Returns the str identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Sepolia => "sepolia",
            Self::Base => "base",
            Self::BaseSepolia => "base-sepolia",
            Self::Optimism => "optimism",
            Self::OptimismSepolia => "optimism-sepolia",
            Self::Arbitrum => "arbitrum",
            Self::ArbitrumSepolia => "arbitrum-sepolia",
            Self::Polygon => "polygon",
            Self::PolygonAmoy => "polygon-amoy",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| WalletError::UnknownChain(s.to_string()))
    }
}

/// Protocol endpoints and connections of a single chain.
#[derive(Debug, Clone)]
pub struct ChainProfile {
    /// The chain.
    pub kind: ChainKind,
    /// The chain ID.
    pub chain_id: ChainId,
    /// The v0.6 entrypoint.
    pub entrypoint: Address,
    /// The account factory.
    pub factory: Address,
    /// The paymaster sponsoring operations, if any.
    pub paymaster: Option<Address>,
    /// Provider for the chain.
    pub provider: DynProvider,
    /// Provider for the bundler. This is the chain provider unless configured otherwise.
    pub bundler: DynProvider,
    /// Tokens by wallet type.
    pub tokens: BTreeMap<WalletType, Token>,
}

impl ChainProfile {
    /// Creates a profile from its configuration and connections.
    pub fn new(
        kind: ChainKind,
        config: &ChainConfig,
        provider: DynProvider,
        bundler: Option<DynProvider>,
    ) -> Self {
        Self {
            kind,
            chain_id: kind.id(),
            entrypoint: config.entrypoint,
            factory: config.factory,
            paymaster: config.paymaster,
            bundler: bundler.unwrap_or_else(|| provider.clone()),
            provider,
            tokens: config.tokens.clone(),
        }
    }

    /// Returns the entrypoint.
    pub fn entrypoint(&self) -> EntryPoint<DynProvider> {
        EntryPoint::new(self.entrypoint, self.provider.clone())
    }

    /// Returns the quorum account at `address`.
    pub fn account(&self, address: Address) -> QuorumAccount<DynProvider> {
        QuorumAccount::new(address, self.provider.clone())
    }

    /// Returns the token held by wallets of `wallet_type`.
    pub fn token(&self, wallet_type: &WalletType) -> Result<&Token, WalletError> {
        self.tokens
            .get(wallet_type)
            .ok_or_else(|| WalletError::UnknownWalletType(self.kind, wallet_type.clone()))
    }

    /// Returns the `decimals()` of `token`.
    pub async fn token_decimals(&self, token: Address) -> TransportResult<u8> {
        IERC20::new(token, self.provider.clone())
            .decimals()
            .call()
            .await
            .map_err(TransportErrorKind::custom)
    }

    /// Returns the balance of `holder` in `token`.
    pub async fn token_balance(&self, token: Address, holder: Address) -> TransportResult<U256> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(holder)
            .call()
            .await
            .map_err(TransportErrorKind::custom)
    }

    /// Returns the `paymasterAndData` field of operations on this chain.
    pub fn paymaster_and_data(&self) -> Bytes {
        self.paymaster
            .map(|paymaster| Bytes::copy_from_slice(paymaster.as_slice()))
            .unwrap_or_default()
    }
}

/// Registry of the configured chains. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<ChainKind, Arc<ChainProfile>>,
}

impl ChainRegistry {
    /// Creates a new instance of [`ChainRegistry`].
    pub fn new(profiles: impl IntoIterator<Item = ChainProfile>) -> Self {
        Self {
            chains: profiles.into_iter().map(|profile| (profile.kind, Arc::new(profile))).collect(),
        }
    }

    /// Get the profile of a chain.
    pub fn get(&self, kind: ChainKind) -> Result<Arc<ChainProfile>, WalletError> {
        self.chains.get(&kind).cloned().ok_or(WalletError::UnsupportedChain(kind))
    }

    /// Get an iterator over the configured chains.
    pub fn kinds(&self) -> impl Iterator<Item = &ChainKind> {
        self.chains.keys()
    }
}
