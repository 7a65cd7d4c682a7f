//! Preconditions of quorum mutations.
//!
//! The platform signer is a member of every custodial quorum. These rules decide when it may
//! change the quorum on its own and when co-signers must approve.

use crate::error::QuorumError;
use alloy::primitives::Address;

/// Checks that the platform may add a member to `quorum`.
///
/// `cosigned` is whether co-signer signatures accompany the request.
pub fn check_add_signer(
    quorum: &[Address],
    platform: Address,
    cosigned: bool,
) -> Result<(), QuorumError> {
    if quorum.is_empty() {
        return Err(QuorumError::EmptyQuorum);
    }

    if !quorum.contains(&platform) {
        if !cosigned {
            return Err(QuorumError::NonCustodial);
        }
    } else if quorum.len() > 1 && !cosigned {
        return Err(QuorumError::CosignerSignatureRequired);
    }

    Ok(())
}

/// Checks that the platform may remove `target` from `quorum`.
pub fn check_delete_signer(
    quorum: &[Address],
    platform: Address,
    target: Address,
) -> Result<(), QuorumError> {
    if quorum.is_empty() {
        return Err(QuorumError::EmptyQuorum);
    }

    if target == platform {
        return Err(QuorumError::CannotRemovePlatform(platform));
    }

    if matches!(quorum, [only] if *only == platform) {
        return Err(QuorumError::FullyManaged);
    }

    Ok(())
}
