use super::invalid_params;
use alloy::primitives::Address;
use thiserror::Error;

/// Errors related to quorum mutations.
#[derive(Debug, Error)]
pub enum QuorumError {
    /// The account reports no quorum members.
    #[error("invalid account state: there are no active signers")]
    EmptyQuorum,
    /// The platform shares the quorum with co-signers, who must approve the mutation.
    #[error("there are co-signers attached to this wallet, signatures are required")]
    CosignerSignatureRequired,
    /// The platform is not a quorum member, so co-signers must approve the mutation.
    #[error("signatures are required for non-custodial wallets")]
    NonCustodial,
    /// The platform signer cannot be removed from a quorum.
    #[error("the platform signer {0} cannot be removed")]
    CannotRemovePlatform(Address),
    /// The platform is the only member of the quorum.
    #[error("this address is fully managed by the platform")]
    FullyManaged,
    /// Quorum mutations require a deployed account.
    #[error("account {0} is not deployed, make at least one transaction before changing signers")]
    AccountNotDeployed(Address),
    /// The candidate is already a member.
    #[error("co-signer {0} already exists")]
    DuplicateSigner(Address),
    /// The account rejected the mutation signatures.
    #[error("invalid signatures")]
    InvalidSignatures,
}

impl From<QuorumError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: QuorumError) -> Self {
        match err {
            QuorumError::EmptyQuorum
            | QuorumError::CosignerSignatureRequired
            | QuorumError::NonCustodial
            | QuorumError::CannotRemovePlatform(_)
            | QuorumError::FullyManaged
            | QuorumError::AccountNotDeployed(_)
            | QuorumError::DuplicateSigner(_)
            | QuorumError::InvalidSignatures => invalid_params(err.to_string()),
        }
    }
}
