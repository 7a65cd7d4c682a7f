use crate::{
    chains::ChainProfile,
    types::{AccountCall, UserOperation, dummy_signature, init_code},
};
use alloy::{
    primitives::{Address, B256, Bytes, U256},
    transports::TransportResult,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Observed on-chain state of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    /// The account.
    pub address: Address,
    /// Whether code is deployed at the address.
    pub deployed: bool,
    /// Current quorum. Empty when undeployed.
    pub signers: Vec<Address>,
}

/// Builds unsigned operations for the accounts of a chain.
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    chain: Arc<ChainProfile>,
    owner: Address,
}

impl OperationBuilder {
    /// Create a new instance of [`OperationBuilder`] for accounts owned by `owner`.
    pub fn new(chain: Arc<ChainProfile>, owner: Address) -> Self {
        Self { chain, owner }
    }

    /// Reads whether `address` is deployed and, if so, its quorum.
    #[instrument(skip(self), fields(chain = %self.chain.kind))]
    pub async fn account_state(&self, address: Address) -> TransportResult<AccountState> {
        let account = self.chain.account(address);

        let deployed = account.is_deployed().await?;
        let signers = if deployed { account.signers().await? } else { vec![] };

        debug!(deployed, quorum = signers.len(), "Fetched account state");

        Ok(AccountState { address, deployed, signers })
    }

    /// Builds the unsigned operation executing `call` from the account.
    ///
    /// Undeployed accounts carry the init code derived from `salt`. The signature is a
    /// placeholder sized to the quorum, or to the platform signature alone for quorum mutations
    /// since those carry the quorum approval in their calldata.
    pub fn build(
        &self,
        state: &AccountState,
        salt: B256,
        nonce: U256,
        call: &AccountCall,
    ) -> UserOperation {
        let init_code = if state.deployed {
            Bytes::new()
        } else {
            init_code(self.chain.factory, self.owner, salt, self.chain.entrypoint)
        };

        // Quorum mutations carry co-signer approvals in calldata, only the platform signs the op.
        let signers = if call.is_quorum_mutation() { 1 } else { state.signers.len() };

        UserOperation {
            sender: state.address,
            nonce,
            initCode: init_code,
            callData: call.abi_encode(),
            paymasterAndData: self.chain.paymaster_and_data(),
            signature: dummy_signature(signers),
            ..Default::default()
        }
    }
}
