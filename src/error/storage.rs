use super::invalid_params;
use alloy::primitives::Address;

/// Errors returned by [`crate::storage::WalletStorage`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A wallet with this address already exists.
    #[error("wallet with address {0} already exists")]
    WalletAlreadyExists(Address),
    /// The escrow wallet does not exist.
    #[error("escrow wallet {0} does not exist")]
    UnknownDynamicWallet(Address),
}

impl From<StorageError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::WalletAlreadyExists(..) | StorageError::UnknownDynamicWallet(..) => {
                invalid_params(err.to_string())
            }
        }
    }
}
