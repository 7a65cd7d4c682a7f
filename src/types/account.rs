use IQuorumAccount::IQuorumAccountInstance;
use alloy::{
    primitives::{Address, B256, Bytes, U256},
    providers::Provider,
    sol,
    sol_types::SolCall,
    transports::{TransportErrorKind, TransportResult},
};
use tracing::debug;

sol! {
    /// A call executed by an account in `executeBatch`.
    #[derive(Debug, PartialEq, Eq)]
    struct Call {
        /// The call target.
        address target;
        /// Amount of native value to send to the target.
        uint256 value;
        /// The calldata bytes.
        bytes data;
    }

    /// The quorum-controlled smart account.
    #[sol(rpc)]
    #[derive(Debug)]
    interface IQuorumAccount {
        /// Executes a single call from the account.
        function execute(address dest, uint256 value, bytes calldata func) external;

        /// Executes a batch of calls from the account.
        function executeBatch(Call[] calldata calls) external;

        /// Returns the current quorum members.
        function getSigners() external view returns (address[] memory);

        /// Returns the nonce consumed by every quorum mutation.
        function signersNonce() external view returns (uint256);

        /// Adds `signer` to the quorum. `signatures` signs `keccak256(signer, signersNonce)`.
        function addSigner(address signer, bytes calldata signatures) external;

        /// Removes `signer` from the quorum. `signatures` signs `keccak256(signer, signersNonce)`.
        function deleteSigner(address signer, bytes calldata signatures) external;
    }
}

sol! {
    /// Deterministic deployer of quorum accounts.
    #[derive(Debug)]
    interface IAccountFactory {
        /// Deploys an account owned by `owner` at the address implied by `salt`.
        function createAccount(address owner, uint256 salt, address entryPoint) external returns (address);
    }
}

/// An intended call from a smart account, before it is wrapped into an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCall {
    /// A single call.
    Single(Call),
    /// A batch of calls executed in order.
    Batch(Vec<Call>),
    /// Adds a member to the account quorum.
    AddSigner {
        /// Member to add.
        signer: Address,
        /// Aggregated quorum mutation signature.
        signatures: Bytes,
    },
    /// Removes a member from the account quorum.
    DeleteSigner {
        /// Member to remove.
        signer: Address,
        /// Aggregated quorum mutation signature.
        signatures: Bytes,
    },
}

impl AccountCall {
    /// Encodes the call as calldata for the account.
    pub fn abi_encode(&self) -> Bytes {
        match self {
            Self::Single(call) => IQuorumAccount::executeCall {
                dest: call.target,
                value: call.value,
                func: call.data.clone(),
            }
            .abi_encode(),
            Self::Batch(calls) => {
                IQuorumAccount::executeBatchCall { calls: calls.clone() }.abi_encode()
            }
            Self::AddSigner { signer, signatures } => {
                IQuorumAccount::addSignerCall { signer: *signer, signatures: signatures.clone() }
                    .abi_encode()
            }
            Self::DeleteSigner { signer, signatures } => IQuorumAccount::deleteSignerCall {
                signer: *signer,
                signatures: signatures.clone(),
            }
            .abi_encode(),
        }
        .into()
    }

    /// Whether the call mutates the account quorum.
    pub fn is_quorum_mutation(&self) -> bool {
        matches!(self, Self::AddSigner { .. } | Self::DeleteSigner { .. })
    }
}

/// Builds the init code deploying an account: the factory address followed by the
/// `createAccount` calldata.
pub fn init_code(factory: Address, owner: Address, salt: B256, entrypoint: Address) -> Bytes {
    let call = IAccountFactory::createAccountCall {
        owner,
        salt: U256::from_be_bytes(salt.0),
        entryPoint: entrypoint,
    };
    [factory.as_slice(), &call.abi_encode()].concat().into()
}

/// A quorum account.
#[derive(Debug, Clone)]
pub struct QuorumAccount<P: Provider> {
    account: IQuorumAccountInstance<P>,
}

impl<P: Provider> QuorumAccount<P> {
    /// Create a new instance of [`QuorumAccount`].
    pub fn new(address: Address, provider: P) -> Self {
        Self { account: IQuorumAccountInstance::new(address, provider) }
    }

    /// Returns the address of the account.
    pub fn address(&self) -> Address {
        *self.account.address()
    }

    /// Whether the account has code deployed.
    pub async fn is_deployed(&self) -> TransportResult<bool> {
        let code = self.account.provider().get_code_at(self.address()).await?;
        Ok(!code.is_empty())
    }

    /// Returns the current quorum.
    pub async fn signers(&self) -> TransportResult<Vec<Address>> {
        let signers =
            self.account.getSigners().call().await.map_err(TransportErrorKind::custom)?;

        debug!(account = %self.address(), ?signers, "Fetched quorum");

        Ok(signers)
    }

    /// Returns the nonce the next quorum mutation must sign over.
    pub async fn signers_nonce(&self) -> TransportResult<U256> {
        self.account.signersNonce().call().await.map_err(TransportErrorKind::custom)
    }
}
