use super::internal_rpc;
use thiserror::Error;

/// Errors related to counterfactual address derivation.
#[derive(Debug, Error)]
pub enum DerivationError {
    /// `getSenderAddress` did not yield an address.
    #[error("could not derive account address: {0}")]
    NoAddress(String),
}

impl From<DerivationError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: DerivationError) -> Self {
        match err {
            DerivationError::NoAddress(_) => internal_rpc(err.to_string()),
        }
    }
}
