use crate::chains::ChainKind;
use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identity of an authenticated wallet owner, as resolved by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Create a new [`OwnerId`].
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of wallet, named after the token it holds (eg. `usdt`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WalletType(String);

impl WalletType {
    /// Create a new [`WalletType`]. Wallet types are case insensitive.
    pub fn new(kind: impl AsRef<str>) -> Self {
        Self(kind.as_ref().to_ascii_lowercase())
    }

    /// Returns the wallet type as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WalletType {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for WalletType {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

impl From<WalletType> for String {
    fn from(kind: WalletType) -> Self {
        kind.0
    }
}

/// Token held by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Display name of the token.
    pub name: String,
    /// Token contract.
    pub address: Address,
}

/// A user wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    /// Owner of the wallet.
    pub owner: OwnerId,
    /// Counterfactual account address.
    pub address: Address,
    /// Salt the address was derived with.
    pub salt: B256,
    /// Chain of the account.
    pub chain: ChainKind,
    /// Wallet type.
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    /// Token held by the wallet.
    pub token: Token,
}

/// A time-boxed escrow wallet awaiting a deposit.
///
/// The escrow state is never stored, it is derived at settlement time from the on-chain
/// balance, [`Self::amount`] and [`Self::expires_at`]. See [`crate::types::EscrowStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicWalletRecord {
    /// Counterfactual account address.
    pub address: Address,
    /// Salt the address was derived with.
    pub salt: B256,
    /// External correlation id.
    pub reference_code: String,
    /// Owner receiving the deposit on settlement.
    pub beneficiary: OwnerId,
    /// Owner that requested the escrow.
    pub created_by: OwnerId,
    /// Chain of the account.
    pub chain: ChainKind,
    /// Wallet type.
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    /// Token expected on the account.
    pub token: Token,
    /// Expected deposit, as a decimal amount of [`Self::token`].
    pub amount: String,
    /// Random disambiguator mixed into the salt.
    pub rand: String,
    /// Recipient of the platform share.
    pub fee_recipient: Address,
    /// Expiry of the escrow. `None` never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl DynamicWalletRecord {
    /// Whether the escrow has expired (or was settled) at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
