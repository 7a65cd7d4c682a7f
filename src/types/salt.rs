use super::{OwnerId, WalletType};
use crate::chains::ChainKind;
use alloy::{
    primitives::B256,
    signers::k256::sha2::{Digest, Sha256},
};
use serde::Serialize;

/// Context an account salt is derived from.
///
/// The context is serialized to JSON with a fixed field order and hashed, so two contexts
/// differing in any field produce unrelated salts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SaltContext {
    /// A user wallet, unique per owner, chain and type.
    User {
        /// Owner of the wallet.
        id: OwnerId,
        /// Chain of the wallet.
        chain: ChainKind,
        /// Wallet type.
        #[serde(rename = "type")]
        wallet_type: WalletType,
    },
    /// An escrow wallet.
    Escrow {
        /// External correlation id.
        reference_code: String,
        /// Beneficiary of the escrow.
        user: OwnerId,
        /// Chain of the wallet.
        chain: ChainKind,
        /// Wallet type.
        #[serde(rename = "type")]
        wallet_type: WalletType,
        /// Expected amount.
        amount: String,
        /// Random disambiguator.
        rand_str: String,
    },
}

/// A 32-byte account salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountSalt(pub B256);

impl AccountSalt {
    /// Derives the salt for `context`.
    pub fn derive(context: &SaltContext) -> Self {
        // Serializing a plain struct of strings cannot fail.
        let canonical = serde_json::to_vec(context).unwrap_or_default();
        Self(B256::from_slice(&Sha256::digest(&canonical)))
    }
}

impl From<AccountSalt> for B256 {
    fn from(salt: AccountSalt) -> Self {
        salt.0
    }
}
