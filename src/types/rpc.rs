//! Parameters and responses of the `wallet_` namespace.

use super::{OwnerId, WalletRecord, WalletType};
use crate::chains::ChainKind;
use alloy::primitives::{Address, B256, Bytes};
use serde::{Deserialize, Serialize};

/// A wallet as listed to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    /// Salt of the account.
    pub salt: B256,
    /// Chain of the account.
    pub chain: ChainKind,
    /// Wallet type.
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    /// Account address.
    pub address: Address,
}

impl From<WalletRecord> for WalletSummary {
    fn from(record: WalletRecord) -> Self {
        Self {
            salt: record.salt,
            chain: record.chain,
            wallet_type: record.wallet_type,
            address: record.address,
        }
    }
}

/// Parameters for `wallet_createWallet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWalletParameters {
    /// Chain of the wallet.
    pub chain: ChainKind,
    /// Wallet type.
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
}

/// A freshly derived account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedWallet {
    /// Counterfactual address.
    pub address: Address,
    /// Salt of the account.
    pub salt: B256,
}

/// A single token transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Recipient.
    pub to_address: Address,
    /// Decimal amount of the wallet token.
    pub amount: String,
}

/// Parameters for `wallet_transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParameters {
    /// Wallet to send from.
    pub wallet_address: Address,
    /// The transfer.
    #[serde(flatten)]
    pub transfer: Transfer,
    /// Co-signer signatures over the operation hash, concatenated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Bytes>,
}

/// Parameters for `wallet_transferBatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBatchParameters {
    /// Wallet to send from.
    pub wallet_address: Address,
    /// Transfers, executed in order.
    pub transactions: Vec<Transfer>,
    /// Co-signer signatures over the operation hash, concatenated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Bytes>,
}

/// Parameters for `wallet_addCosigner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCosignerParameters {
    /// Wallet whose quorum is extended.
    pub wallet_address: Address,
    /// New quorum member.
    pub cosigner_address: Address,
    /// Co-signer signatures over the mutation hash, concatenated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Bytes>,
}

/// Parameters for `wallet_deleteCosigner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCosignerParameters {
    /// Wallet whose quorum is reduced.
    pub wallet_address: Address,
    /// Quorum member to remove.
    pub cosigner_address: Address,
    /// Co-signer signatures over the mutation hash, concatenated.
    pub signatures: Bytes,
}

/// Parameters for `wallet_createDynamicWallet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDynamicWalletParameters {
    /// Chain of the escrow.
    pub chain: ChainKind,
    /// Wallet type.
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    /// External correlation id.
    pub reference_code: String,
    /// Beneficiary of the escrow.
    pub user: OwnerId,
    /// Expected deposit, as a decimal amount.
    pub amount: String,
    /// Lifetime of the escrow in minutes. Escrows without a lifetime never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
}

/// Parameters for `wallet_settleDynamicWallet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleDynamicWalletParameters {
    /// Escrow to settle.
    pub wallet_address: Address,
}

/// A submitted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedOperation {
    /// Hash returned by the bundler.
    pub user_op_hash: B256,
}

/// Status of a submitted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    /// Operation hash.
    pub user_op_hash: B256,
    /// Including transaction, once mined.
    pub transaction_hash: Option<B256>,
}
