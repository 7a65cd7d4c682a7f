//! Platform signer and quorum signature coordination.

mod coordinator;
pub use coordinator::{QuorumMutation, SignatureCoordinator};

mod r#dyn;
pub use r#dyn::DynSigner;

pub mod quorum;
