use super::{
    DynSigner,
    quorum::{check_add_signer, check_delete_signer},
};
use crate::{constants::SIGNATURE_LENGTH, error::WalletError, types::UserOperation};
use alloy::{
    primitives::{Address, B256, Bytes, ChainId, U256, keccak256},
    signers::Signer,
    sol_types::SolValue,
};
use tracing::{debug, instrument};

/// A change of an account quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuorumMutation {
    /// Add a member.
    Add(Address),
    /// Remove a member.
    Delete(Address),
}

impl QuorumMutation {
    /// The member being added or removed.
    pub fn candidate(&self) -> Address {
        match self {
            Self::Add(candidate) | Self::Delete(candidate) => *candidate,
        }
    }

    /// Hash the quorum signs to approve this mutation: `keccak256(abi.encodePacked(candidate,
    /// signersNonce))`.
    pub fn hash(&self, signers_nonce: U256) -> B256 {
        keccak256((self.candidate(), signers_nonce).abi_encode_packed())
    }
}

/// Produces the aggregated signatures accounts verify.
///
/// Signatures are the platform signature followed by the co-signer signatures in the order the
/// caller supplied them. Accounts verify them in that order.
#[derive(Debug, Clone)]
pub struct SignatureCoordinator {
    signer: DynSigner,
}

impl SignatureCoordinator {
    /// Create a new instance of [`SignatureCoordinator`].
    pub fn new(signer: DynSigner) -> Self {
        Self { signer }
    }

    /// Address of the platform signer.
    pub fn platform(&self) -> Address {
        self.signer.address()
    }

    /// Signs a gas-filled operation, replacing its placeholder signature.
    #[instrument(skip_all, fields(sender = %op.sender, nonce = %op.nonce))]
    pub async fn sign_operation(
        &self,
        mut op: UserOperation,
        entrypoint: Address,
        chain_id: ChainId,
        cosigners: Option<&Bytes>,
    ) -> Result<UserOperation, WalletError> {
        let hash = op.hash(entrypoint, chain_id);
        op.signature = self.aggregate(hash, cosigners).await?;

        debug!(%hash, "Signed operation");

        Ok(op)
    }

    /// Signs a quorum mutation after checking the platform may submit it.
    #[instrument(skip_all, fields(?mutation, %signers_nonce))]
    pub async fn sign_quorum_mutation(
        &self,
        mutation: QuorumMutation,
        quorum: &[Address],
        signers_nonce: U256,
        cosigners: Option<&Bytes>,
    ) -> Result<Bytes, WalletError> {
        match mutation {
            QuorumMutation::Add(_) => {
                check_add_signer(quorum, self.platform(), cosigners.is_some())?
            }
            QuorumMutation::Delete(target) => check_delete_signer(quorum, self.platform(), target)?,
        }

        self.aggregate(mutation.hash(signers_nonce), cosigners).await
    }

    /// Checks that `cosigners` is a concatenation of whole signatures.
    pub fn validate_cosigners(cosigners: Option<&Bytes>) -> Result<(), WalletError> {
        match cosigners {
            Some(bytes) if bytes.len() % SIGNATURE_LENGTH != 0 => {
                Err(WalletError::InvalidSignatureLength(bytes.len()))
            }
            _ => Ok(()),
        }
    }

    /// Signs `hash` as a personal message and appends `cosigners`.
    async fn aggregate(&self, hash: B256, cosigners: Option<&Bytes>) -> Result<Bytes, WalletError> {
        Self::validate_cosigners(cosigners)?;
        let cosigners = cosigners.map(|bytes| &bytes[..]).unwrap_or_default();

        let signature = self.signer.sign_message(hash.as_slice()).await?;

        Ok([signature.as_bytes().as_slice(), cosigners].concat().into())
    }
}
