use super::{internal_rpc, rpc_err};
use alloy::{
    rpc::types::error::EthRpcErrorCode,
    transports::{RpcError, TransportError},
};
use thiserror::Error;

/// Errors related to user operations.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The bundler or the entrypoint rejected the operation.
    #[error("operation rejected: {0}")]
    Rejected(String),
    /// The bundler could not be reached or returned garbage.
    #[error(transparent)]
    Transport(TransportError),
}

impl OperationError {
    /// Returns the rejection message, if the operation was rejected.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            Self::Transport(_) => None,
        }
    }
}

impl From<TransportError> for OperationError {
    fn from(err: TransportError) -> Self {
        match err {
            RpcError::ErrorResp(payload) => Self::Rejected(payload.message.into_owned()),
            err => Self::Transport(err),
        }
    }
}

impl From<OperationError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::Rejected(_) => {
                rpc_err(EthRpcErrorCode::ExecutionError.code(), err.to_string(), None)
            }
            OperationError::Transport(_) => internal_rpc(err.to_string()),
        }
    }
}
