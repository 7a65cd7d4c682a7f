use crate::constants::{DUMMY_SIGNATURE, SIGNATURE_LENGTH};
use alloy::{
    primitives::{Address, B256, Bytes, ChainId, U256, keccak256},
    sol,
    sol_types::SolValue,
};
use serde::{Deserialize, Serialize};

sol! {
    /// A user operation as understood by the v0.6 entrypoint.
    ///
    /// Serialized in the shape expected by `eth_sendUserOperation` and
    /// `eth_estimateUserOperationGas`.
    #[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct UserOperation {
        /// The smart account executing the operation.
        address sender;
        /// Entrypoint managed nonce of the sender.
        uint256 nonce;
        /// Factory address followed by the factory calldata. Empty once the account is deployed.
        bytes initCode;
        /// Calldata executed on the sender.
        bytes callData;
        /// Gas allocated to the main execution call.
        uint256 callGasLimit;
        /// Gas allocated to the verification step.
        uint256 verificationGasLimit;
        /// Gas paid to the bundler for overhead.
        uint256 preVerificationGas;
        /// Maximum fee per gas (EIP-1559).
        uint256 maxFeePerGas;
        /// Maximum priority fee per gas (EIP-1559).
        uint256 maxPriorityFeePerGas;
        /// Paymaster address followed by paymaster specific data.
        bytes paymasterAndData;
        /// Aggregated quorum signature.
        bytes signature;
    }
}

impl UserOperation {
    /// Whether the operation deploys its sender.
    pub fn deploys_sender(&self) -> bool {
        !self.initCode.is_empty()
    }

    /// Computes the operation hash the entrypoint asks the account to validate.
    ///
    /// This is `keccak256(abi.encode(keccak256(pack(op)), entrypoint, chainId))` where `pack`
    /// hashes every dynamic field and omits the signature.
    pub fn hash(&self, entrypoint: Address, chain_id: ChainId) -> B256 {
        let packed = (
            self.sender,
            self.nonce,
            keccak256(&self.initCode),
            keccak256(&self.callData),
            self.callGasLimit,
            self.verificationGasLimit,
            self.preVerificationGas,
            self.maxFeePerGas,
            self.maxPriorityFeePerGas,
            keccak256(&self.paymasterAndData),
        )
            .abi_encode();

        keccak256((keccak256(packed), entrypoint, U256::from(chain_id)).abi_encode())
    }

    /// Copies the gas and fee fields from another operation.
    pub fn with_gas_from(mut self, other: &Self) -> Self {
        self.callGasLimit = other.callGasLimit;
        self.verificationGasLimit = other.verificationGasLimit;
        self.preVerificationGas = other.preVerificationGas;
        self.maxFeePerGas = other.maxFeePerGas;
        self.maxPriorityFeePerGas = other.maxPriorityFeePerGas;
        self
    }
}

/// Returns a placeholder signature for a quorum of `signers` members.
///
/// Gas estimation charges for signature bytes and for the number of `ecrecover` calls, so the
/// placeholder mirrors the length of the real aggregated signature. An empty quorum (undeployed
/// account) is priced as a single signer.
pub fn dummy_signature(signers: usize) -> Bytes {
    let count = signers.max(1);
    let mut out = Vec::with_capacity(count * SIGNATURE_LENGTH);
    for _ in 0..count {
        out.extend_from_slice(DUMMY_SIGNATURE.as_ref());
    }
    out.into()
}

/// Gas fields returned by `eth_estimateUserOperationGas`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationGasEstimate {
    /// Pre-verification gas.
    pub pre_verification_gas: U256,
    /// Verification gas limit.
    pub verification_gas_limit: U256,
    /// Call gas limit.
    pub call_gas_limit: U256,
}

/// A user operation as returned by `eth_getUserOperationByHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationByHash {
    /// The operation itself.
    pub user_operation: UserOperation,
    /// Entrypoint that handled the operation.
    pub entry_point: Address,
    /// Transaction that included the operation, once mined.
    pub transaction_hash: Option<B256>,
    /// Block hash, once mined.
    #[serde(default)]
    pub block_hash: Option<B256>,
    /// Block number, once mined.
    #[serde(default)]
    pub block_number: Option<U256>,
}
