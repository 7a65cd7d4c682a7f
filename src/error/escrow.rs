use super::{OperationError, invalid_params, rpc_err};
use crate::{
    chains::ChainKind,
    types::{OwnerId, WalletType},
};
use alloy::{
    primitives::{Address, B256, Bytes},
    rpc::types::error::EthRpcErrorCode,
};
use thiserror::Error;

/// Errors related to escrow wallets.
#[derive(Debug, Error)]
pub enum EscrowError {
    /// No escrow wallet exists at the address.
    #[error("invalid escrow wallet address {0}")]
    UnknownEscrow(Address),
    /// The escrow wallet expired or was already settled.
    #[error("escrow wallet {0} is expired")]
    Expired(Address),
    /// The beneficiary has no wallet to receive the payout.
    #[error("beneficiary {beneficiary} has no {wallet_type} wallet on {chain}")]
    MissingBeneficiaryWallet {
        /// The beneficiary.
        beneficiary: OwnerId,
        /// Chain of the escrow.
        chain: ChainKind,
        /// Wallet type of the escrow.
        wallet_type: WalletType,
    },
    /// Only one of the two payouts was accepted by the bundler.
    ///
    /// The escrow is left open. The accepted operation will still execute.
    #[error("escrow wallet {escrow} settled partially, {accepted} was accepted but: {rejected}")]
    PartialSettlement {
        /// The escrow wallet.
        escrow: Address,
        /// Hash of the accepted operation.
        accepted: B256,
        /// Failure of the other operation.
        rejected: OperationError,
    },
}

impl From<EscrowError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: EscrowError) -> Self {
        match err {
            EscrowError::UnknownEscrow(_)
            | EscrowError::Expired(_)
            | EscrowError::MissingBeneficiaryWallet { .. } => invalid_params(err.to_string()),
            EscrowError::PartialSettlement { accepted, .. } => rpc_err(
                EthRpcErrorCode::ExecutionError.code(),
                err.to_string(),
                Some(Bytes::copy_from_slice(accepted.as_slice())),
            ),
        }
    }
}
