//! Wallet service error types.
use crate::{
    chains::ChainKind,
    types::{OwnerId, WalletType},
};
use alloy::{
    primitives::{Address, Bytes},
    transports::TransportErrorKind,
};
use core::fmt;
use jsonrpsee::core::RpcResult;
use thiserror::Error;

mod derivation;
pub use derivation::DerivationError;

mod escrow;
pub use escrow::EscrowError;

mod op;
pub use op::OperationError;

mod quorum;
pub use quorum::QuorumError;

mod storage;
pub use storage::StorageError;

/// The overarching error type returned by wallet actions.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Errors related to quorum mutations.
    #[error(transparent)]
    Quorum(#[from] QuorumError),
    /// Errors related to escrow wallets.
    #[error(transparent)]
    Escrow(#[from] EscrowError),
    /// Errors related to operations.
    #[error(transparent)]
    Operation(#[from] OperationError),
    /// Errors related to address derivation.
    #[error(transparent)]
    Derivation(#[from] DerivationError),
    /// Errors related to storage.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The chain is not known.
    #[error("unknown chain {0}")]
    UnknownChain(String),
    /// The chain is known but not configured.
    #[error("unsupported chain {0}")]
    UnsupportedChain(ChainKind),
    /// The wallet type has no token on the chain.
    #[error("wallet type {1} is not supported on {0}")]
    UnknownWalletType(ChainKind, WalletType),
    /// The amount could not be parsed or is zero.
    #[error("invalid amount {0}")]
    InvalidAmount(String),
    /// The escrow lifetime, in minutes, is not representable as a timestamp.
    #[error("invalid expiry of {0} minutes")]
    InvalidExpiry(u64),
    /// A batch transfer without transfers.
    #[error("a batch must contain at least one transfer")]
    EmptyBatch,
    /// Co-signer signatures that are not a whole number of signatures.
    #[error("signatures must be a concatenation of 65 byte signatures, got {0} bytes")]
    InvalidSignatureLength(usize),
    /// The owner already has a wallet of this kind.
    #[error("wallet already exists for {chain} and type {wallet_type}")]
    WalletExists {
        /// The chain.
        chain: ChainKind,
        /// The wallet type.
        wallet_type: WalletType,
    },
    /// The wallet does not belong to the caller.
    #[error("you do not own {0}")]
    NotOwner(Address),
    /// The escrow beneficiary is not a known owner.
    #[error("invalid user/recipient {0}")]
    UnknownBeneficiary(OwnerId),
    /// An error occurred talking to RPC.
    #[error(transparent)]
    RpcError(#[from] alloy::transports::RpcError<TransportErrorKind>),
    /// The platform signer failed.
    #[error(transparent)]
    SignerError(#[from] alloy::signers::Error),
    /// An internal error occurred.
    #[error(transparent)]
    InternalError(#[from] eyre::Error),
}

impl From<WalletError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Quorum(inner) => inner.into(),
            WalletError::Escrow(inner) => inner.into(),
            WalletError::Operation(inner) => inner.into(),
            WalletError::Derivation(inner) => inner.into(),
            WalletError::Storage(inner) => inner.into(),
            WalletError::UnknownChain(_)
            | WalletError::UnsupportedChain(_)
            | WalletError::UnknownWalletType(..)
            | WalletError::InvalidAmount(_)
            | WalletError::InvalidExpiry(_)
            | WalletError::EmptyBatch
            | WalletError::InvalidSignatureLength(_)
            | WalletError::WalletExists { .. }
            | WalletError::NotOwner(_)
            | WalletError::UnknownBeneficiary(_) => invalid_params(err.to_string()),
            WalletError::RpcError(_)
            | WalletError::SignerError(_)
            | WalletError::InternalError(_) => internal_rpc(err.to_string()),
        }
    }
}

/// A helper trait to provide an RPC error code.
pub trait ToRpcResult<Ok, Err>: Sized {
    /// Converts result to [`RpcResult`] by converting error variant to
    /// [`jsonrpsee_types::error::ErrorObject`]
    fn to_rpc_result(self) -> RpcResult<Ok>
    where
        Err: fmt::Display;
}

macro_rules! impl_error_helpers {
    ($err:ty) => {
        impl<Ok> ToRpcResult<Ok, $err> for Result<Ok, $err> {
            fn to_rpc_result(self) -> RpcResult<Ok> {
                self.map_err(|err| err.into())
            }
        }

        impl From<$err> for String {
            fn from(err: $err) -> Self {
                err.to_string()
            }
        }
    };
}

impl_error_helpers!(WalletError);
impl_error_helpers!(QuorumError);
impl_error_helpers!(EscrowError);
impl_error_helpers!(OperationError);
impl_error_helpers!(DerivationError);
impl_error_helpers!(StorageError);

/// Constructs an invalid params JSON‑RPC error.
fn invalid_params(msg: impl Into<String>) -> jsonrpsee::types::error::ErrorObject<'static> {
    rpc_err(jsonrpsee::types::error::INVALID_PARAMS_CODE, msg, None)
}

/// Constructs an internal JSON‑RPC error.
fn internal_rpc(msg: impl Into<String>) -> jsonrpsee::types::error::ErrorObject<'static> {
    rpc_err(jsonrpsee::types::error::INTERNAL_ERROR_CODE, msg, None)
}

/// Constructs a JSON‑RPC error with `code`, `message` and optional `data`.
fn rpc_err(
    code: i32,
    msg: impl Into<String>,
    data: Option<Bytes>,
) -> jsonrpsee::types::error::ErrorObject<'static> {
    jsonrpsee::types::error::ErrorObject::owned(code, msg.into(), data)
}
